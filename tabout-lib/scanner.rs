//! Bidirectional delimiter pair scanning on raw line text.
//!
//! Given a caret, the scanner answers "is the caret inside an unclosed pair,
//! and where does that pair close?" without tokenizing the document. It works
//! in two phases:
//!
//! 1. **Left scan**: walk backwards from the caret to the nearest unclosed
//!    opener. On the caret's own line quotes are considered first: a quote
//!    with a partner further left is a closed string and is skipped whole,
//!    a quote without one is the opener. Brackets are balanced with a depth
//!    counter and may be found on earlier lines.
//! 2. **Right scan**: walk forwards from the caret to the opener's closer. A
//!    string closes at the next matching quote on the caret's line. A bracket
//!    closes at the first unbalanced closer, skipping same-line quoted spans
//!    so brackets inside string literals don't count.
//!
//! Both phases look at most [`MAX_LINES_TO_SEARCH`] lines away from the caret,
//! so the cost does not depend on the document size. Running out
//! of window, or text that doesn't balance, just means the caret is not
//! inside a pair.
//!
//! ```
//! use tabout_lib::{
//!   position::Position,
//!   scanner::scan,
//! };
//!
//! let text = ["x = (", "  1", ")"];
//! let result = scan(&text[..], Position::new(1, 2));
//! assert_eq!(result.close_position(), Some(Position::new(2, 1)));
//! ```

use serde::Serialize;
use tabout_core::chars::char_is_escaped;

use crate::{
  delimiters::{
    DelimiterKind,
    Pair,
    find_token,
    rfind_token,
    string_token_at,
    string_token_ending_at,
    structural_closer,
    structural_opener,
    token_at,
  },
  position::Position,
  selection::Range,
  text::LineSource,
};

/// How many lines above and below the caret a scan may visit.
pub const MAX_LINES_TO_SEARCH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "state")]
pub enum ScanResult {
  Outside,
  Inside {
    /// Start of the opening token.
    open:  Position,
    /// Position right after the closing token.
    close: Position,
    kind:  DelimiterKind,
  },
}

impl ScanResult {
  pub fn is_inside(&self) -> bool {
    matches!(self, Self::Inside { .. })
  }

  pub fn close_position(&self) -> Option<Position> {
    match self {
      Self::Inside { close, .. } => Some(*close),
      Self::Outside => None,
    }
  }

  pub fn kind(&self) -> Option<DelimiterKind> {
    match self {
      Self::Inside { kind, .. } => Some(*kind),
      Self::Outside => None,
    }
  }
}

#[derive(Debug, Clone, Copy)]
struct Opener {
  pair: &'static Pair,
  pos:  Position,
}

pub struct PairScanner<'a, T: ?Sized> {
  text:   &'a T,
  window: usize,
}

impl<'a, T> PairScanner<'a, T>
where
  T: LineSource + ?Sized,
{
  pub fn new(text: &'a T) -> Self {
    Self {
      text,
      window: MAX_LINES_TO_SEARCH,
    }
  }

  /// Narrows how many lines away from the caret the scan may look. Windows
  /// wider than [`MAX_LINES_TO_SEARCH`] are clamped to it.
  pub fn with_window(mut self, window: usize) -> Self {
    self.window = window.min(MAX_LINES_TO_SEARCH);
    self
  }

  pub fn scan(&self, caret: Position) -> ScanResult {
    let Some(opener) = self.find_opener(caret) else {
      tracing::trace!("no unclosed opener before {caret}");
      return ScanResult::Outside;
    };
    tracing::trace!("opener {:?} at {}", opener.pair.open, opener.pos);

    let Some(close) = self.find_closer(opener.pair, caret) else {
      tracing::trace!("no closer for {:?} after {caret}", opener.pair.open);
      return ScanResult::Outside;
    };

    ScanResult::Inside {
      open: opener.pos,
      close,
      kind: opener.pair.kind,
    }
  }

  /// Scans for a range. Only carets can be inside a pair.
  pub fn scan_range(&self, range: &Range) -> ScanResult {
    if !range.is_empty() {
      return ScanResult::Outside;
    }
    self.scan(range.head)
  }

  fn find_opener(&self, caret: Position) -> Option<Opener> {
    let first_row = caret.row.saturating_sub(self.window);
    let mut depth = 0usize;

    for row in (first_row..=caret.row).rev() {
      let chars = self.text.line_chars(row);
      let mut end = if row == caret.row {
        caret.col.min(chars.len())
      } else {
        chars.len()
      };

      while end > 0 {
        let idx = end - 1;

        if row == caret.row
          && let Some((start, pair)) = string_token_ending_at(&chars, idx)
        {
          match rfind_token(&chars, start, pair.open) {
            // A closed string, resume before its opening quote.
            Some(open) => {
              end = open;
              continue;
            },
            None => {
              return Some(Opener {
                pair,
                pos: Position::new(row, start),
              });
            },
          }
        }

        if !char_is_escaped(&chars, idx) {
          if let Some(pair) = structural_opener(chars[idx]) {
            if depth == 0 {
              return Some(Opener {
                pair,
                pos: Position::new(row, idx),
              });
            }
            depth -= 1;
          } else if structural_closer(chars[idx]).is_some() {
            depth += 1;
          }
        }

        end = idx;
      }
    }

    None
  }

  fn find_closer(&self, pair: &Pair, caret: Position) -> Option<Position> {
    match pair.kind {
      DelimiterKind::String => {
        let chars = self.text.line_chars(caret.row);
        let from = caret.col.min(chars.len());
        find_token(&chars, from, pair.close)
          .map(|idx| Position::new(caret.row, idx + pair.close_len()))
      },
      DelimiterKind::Structural => self.find_structural_closer(pair, caret),
    }
  }

  fn find_structural_closer(&self, pair: &Pair, caret: Position) -> Option<Position> {
    let last_row = caret
      .row
      .saturating_add(self.window)
      .min(self.text.line_count().saturating_sub(1));
    let mut depth = 0usize;

    for row in caret.row..=last_row {
      let chars = self.text.line_chars(row);
      let mut idx = if row == caret.row {
        caret.col.min(chars.len())
      } else {
        0
      };

      while idx < chars.len() {
        if let Some(quote) = string_token_at(&chars, idx)
          && let Some(end) = find_token(&chars, idx + quote.open_len(), quote.close)
        {
          idx = end + quote.close_len();
          continue;
        }

        if token_at(&chars, idx, pair.close) {
          if depth == 0 {
            return Some(Position::new(row, idx + pair.close_len()));
          }
          depth -= 1;
        } else if token_at(&chars, idx, pair.open) {
          depth += 1;
        }

        idx += 1;
      }
    }

    None
  }
}

/// Scans around `caret` with the default window.
pub fn scan<T>(text: &T, caret: Position) -> ScanResult
where
  T: LineSource + ?Sized,
{
  PairScanner::new(text).scan(caret)
}
