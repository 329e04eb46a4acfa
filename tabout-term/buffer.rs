//! In-memory host for a single trigger.
//!
//! [`Snapshot`] is the read side handed to the dispatcher, [`Buffer`] is the
//! editable document that receives the chosen command.

use std::borrow::Cow;

use ropey::Rope;
use tabout_lib::{
  action::{
    EditCommandSink,
    Reveal,
  },
  position::Position,
  selection::{
    Range,
    Selection,
  },
  text::{
    LineSource,
    SelectionSource,
  },
};
use tabout_renpy::IndentOptions;

/// Frozen text and selection, read once per trigger.
#[derive(Debug, Clone)]
pub struct Snapshot {
  text:      Rope,
  selection: Selection,
}

impl LineSource for Snapshot {
  fn line_count(&self) -> usize {
    self.text.line_count()
  }

  fn line(&self, row: usize) -> Cow<'_, str> {
    LineSource::line(&self.text, row)
  }

  fn line_len(&self, row: usize) -> usize {
    self.text.line_len(row)
  }
}

impl SelectionSource for Snapshot {
  fn selection(&self) -> Selection {
    self.selection.clone()
  }
}

#[derive(Debug, Clone)]
pub struct Buffer {
  pub text:      Rope,
  pub selection: Selection,
  pub indent:    IndentOptions,
  pub warnings:  Vec<String>,
  pub reveal:    Option<Reveal>,
}

impl Buffer {
  pub fn new(text: Rope, selection: Selection, indent: IndentOptions) -> Self {
    Self {
      text,
      selection,
      indent,
      warnings: Vec::new(),
      reveal: None,
    }
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      text:      self.text.clone(),
      selection: self.selection.clone(),
    }
  }

  fn clamp(&self, pos: Position) -> Position {
    let row = pos.row.min(self.text.len_lines().saturating_sub(1));
    Position::new(row, pos.col.min(self.text.line_len(row)))
  }

  fn pos_to_char(&self, pos: Position) -> usize {
    let pos = self.clamp(pos);
    self.text.line_to_char(pos.row) + pos.col
  }

  fn char_to_pos(&self, idx: usize) -> Position {
    let row = self.text.char_to_line(idx);
    Position::new(row, idx - self.text.line_to_char(row))
  }

  fn rows(range: &Range) -> std::ops::RangeInclusive<usize> {
    let (first, last) = range.line_span();
    first..=last
  }

  fn map_positions(&mut self, f: impl Fn(Position) -> Position) {
    let ranges: Vec<Range> = self
      .selection
      .iter()
      .map(|range| Range::new(f(range.anchor), f(range.head)))
      .collect();
    if let Ok(selection) = Selection::new(ranges) {
      self.selection = selection;
    }
  }

  fn shift_row(&mut self, row: usize, delta: isize) {
    self.map_positions(|pos| {
      if pos.row == row {
        pos.with_col(pos.col.saturating_add_signed(delta))
      } else {
        pos
      }
    });
  }

  /// Removes one indent unit (or what there is of it) from the start of `row`.
  fn outdent_row(&mut self, row: usize) {
    let line = LineSource::line(&self.text, row);
    let removed = if line.starts_with('\t') {
      1
    } else {
      line
        .chars()
        .take(self.indent.tab_width.max(1))
        .take_while(|&ch| ch == ' ')
        .count()
    };
    if removed == 0 {
      return;
    }

    let start = self.text.line_to_char(row);
    self.text.remove(start..start + removed);
    self.shift_row(row, -(removed as isize));
  }
}

impl EditCommandSink for Buffer {
  /// Each range indents its own rows, so carets sharing a line indent it once
  /// each.
  fn indent_lines(&mut self) {
    let unit = self.indent.unit();
    let unit_len = unit.chars().count() as isize;
    let rows: Vec<usize> = self.selection.iter().flat_map(Self::rows).collect();

    for row in rows {
      if row >= self.text.len_lines() {
        continue;
      }
      let start = self.text.line_to_char(row);
      self.text.insert(start, &unit);
      self.shift_row(row, unit_len);
    }
  }

  fn outdent_lines(&mut self) {
    let mut rows: Vec<usize> = self.selection.iter().flat_map(Self::rows).collect();
    rows.sort_unstable();
    rows.dedup();

    for row in rows {
      if row < self.text.len_lines() {
        self.outdent_row(row);
      }
    }
  }

  fn insert_tab(&mut self) {
    let unit = self.indent.unit();
    let unit_len = unit.chars().count();

    let mut spans: Vec<(usize, usize, usize)> = self
      .selection
      .iter()
      .enumerate()
      .map(|(idx, range)| (self.pos_to_char(range.from()), self.pos_to_char(range.to()), idx))
      .collect();
    spans.sort_unstable();

    // Overlapping spans are trimmed so every char is replaced at most once.
    let mut prev_end = 0;
    for span in &mut spans {
      span.0 = span.0.max(prev_end);
      span.1 = span.1.max(span.0);
      prev_end = span.1;
    }

    let mut carets = vec![Position::zero(); spans.len()];
    let mut delta = 0isize;
    let mut resolved = Vec::with_capacity(spans.len());
    for &(from, to, idx) in &spans {
      let new_from = from.saturating_add_signed(delta);
      resolved.push((idx, new_from + unit_len));
      delta += unit_len as isize - (to - from) as isize;
    }

    for &(from, to, _) in spans.iter().rev() {
      self.text.remove(from..to);
      self.text.insert(from, &unit);
    }

    for (idx, caret) in resolved {
      carets[idx] = self.char_to_pos(caret);
    }
    if let Ok(selection) = Selection::new(carets.into_iter().map(Range::point)) {
      self.selection = selection;
    }
  }

  fn move_cursor_right(&mut self) {
    let ranges: Vec<Range> = self
      .selection
      .iter()
      .map(|range| {
        if !range.is_empty() {
          return Range::point(range.to());
        }
        let head = self.clamp(range.head);
        let next = if head.col < self.text.line_len(head.row) {
          head.with_col(head.col + 1)
        } else if head.row + 1 < self.text.len_lines() {
          Position::new(head.row + 1, 0)
        } else {
          head
        };
        Range::point(next)
      })
      .collect();
    if let Ok(selection) = Selection::new(ranges) {
      self.selection = selection;
    }
  }

  fn set_cursor(&mut self, pos: Position, reveal: Reveal) {
    let pos = self.clamp(pos);
    log::debug!("caret set to {pos} ({reveal:?})");
    self.selection = Selection::point(pos);
    self.reveal = Some(reveal);
  }

  fn show_warning(&mut self, message: &str) {
    log::info!("warning: {message}");
    self.warnings.push(message.to_string());
  }
}
