//! Line and selection geometry derived from the live selection set.

use tabout_core::chars::{
  char_is_whitespace,
  str_is_blank,
};

use crate::{
  position::Position,
  selection::{
    Range,
    Selection,
  },
  text::LineSource,
};

/// Number of distinct lines touched by the selection set.
///
/// A multi-line range ending at column 0 does not count its last line (see
/// [`Range::line_span`]). Runs in the number of ranges, not the number of
/// rows they span.
pub fn selected_line_count(selection: &Selection) -> usize {
  let mut spans: Vec<(usize, usize)> = selection.iter().map(Range::line_span).collect();
  spans.sort_unstable();

  let mut count = 0;
  let mut current: Option<(usize, usize)> = None;
  for (start, end) in spans {
    match current {
      Some((first, last)) if start <= last => current = Some((first, last.max(end))),
      Some((first, last)) => {
        count += last - first + 1;
        current = Some((start, end));
      },
      None => current = Some((start, end)),
    }
  }
  if let Some((first, last)) = current {
    count += last - first + 1;
  }
  count
}

/// True if every range is a caret sitting at the end of its line's content.
///
/// Any non-empty range makes this false.
pub fn is_cursor_at_end_of_line<T>(text: &T, selection: &Selection) -> bool
where
  T: LineSource + ?Sized,
{
  selection
    .iter()
    .all(|range| range.is_empty() && range.head.col == text.line_len(range.head.row))
}

/// True if the line is empty or holds only whitespace.
pub fn is_line_purely_whitespace(line: &str) -> bool {
  str_is_blank(line)
}

/// True if nothing but whitespace precedes `pos` on its line.
pub fn is_at_start_of_content<T>(text: &T, pos: Position) -> bool
where
  T: LineSource + ?Sized,
{
  text
    .line(pos.row)
    .chars()
    .take(pos.col)
    .all(char_is_whitespace)
}
