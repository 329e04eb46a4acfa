//! Same-line probes to the right of the caret.

use tabout_core::chars::char_is_whitespace;

use crate::delimiters::{
  ALL_PAIRS,
  Pair,
  find_token,
  token_at,
};

/// How much whitespace may separate the caret from a closer by default.
pub const DEFAULT_MAX_GAP: usize = 64;

/// Tokens that count as "a closer right ahead", longest first.
pub const CLOSE_AHEAD_TOKENS: &[&str] = &[
  "\"\"\"", "'''", ")", "}", "]", ">", "\"", "'", "`", ";", ":",
];

/// The closer found after at most `max_gap` whitespace chars right of `col`.
///
/// Escaped tokens are not closers.
pub fn close_delimiter_ahead(line: &str, col: usize, max_gap: usize) -> Option<&'static str> {
  let chars: Vec<char> = line.chars().collect();
  let col = col.min(chars.len());
  let gap = chars[col..]
    .iter()
    .take_while(|&&ch| char_is_whitespace(ch))
    .count();
  if gap > max_gap {
    return None;
  }

  let start = col + gap;
  CLOSE_AHEAD_TOKENS
    .iter()
    .copied()
    .find(|token| token_at(&chars, start, token))
}

pub fn has_close_delimiter_ahead(line: &str, col: usize, max_gap: usize) -> bool {
  close_delimiter_ahead(line, col, max_gap).is_some()
}

/// A complete pair found on the line to the right of the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairAhead {
  pub pair: &'static Pair,
  /// Column of the opening token.
  pub open: usize,
}

impl PairAhead {
  /// The column just inside the opener, where a jump-in lands.
  pub fn inner_col(&self) -> usize {
    self.open + self.pair.open_len()
  }
}

/// Finds the leftmost opener right of `col` whose closer also appears later on
/// the line.
///
/// Longer tokens are tried first, so `"""` beats `"` at the same column.
pub fn has_pair_delimiter_right(line: &str, col: usize) -> Option<PairAhead> {
  let chars: Vec<char> = line.chars().collect();
  let col = col.min(chars.len());
  let mut best: Option<PairAhead> = None;

  for pair in ALL_PAIRS {
    let Some(open) = find_token(&chars, col, pair.open) else {
      continue;
    };
    if find_token(&chars, open + pair.open_len(), pair.close).is_none() {
      continue;
    }

    match best {
      Some(found) if found.open <= open => {},
      _ => best = Some(PairAhead { pair, open }),
    }
  }

  best
}
