//! The fixed delimiter table and token matching over line text.
//!
//! Structural pairs nest and may span lines. String pairs are self-closing
//! quotes that never nest and are only paired within one line.
//!
//! Lookup is by exact token, longest first: `"""` has to win over `"` or a
//! triple quote would read as three empty strings.
//!
//! All matching here is escape aware. A token whose first char is escaped
//! (see [`char_is_escaped`]) is not a token.

use serde::{
  Deserialize,
  Serialize,
};
use tabout_core::chars::char_is_escaped;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DelimiterKind {
  Structural,
  String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
  pub open:  &'static str,
  pub close: &'static str,
  pub kind:  DelimiterKind,
}

impl Pair {
  const fn structural(open: &'static str, close: &'static str) -> Self {
    Self {
      open,
      close,
      kind: DelimiterKind::Structural,
    }
  }

  const fn string(quote: &'static str) -> Self {
    Self {
      open:  quote,
      close: quote,
      kind:  DelimiterKind::String,
    }
  }

  /// true if open == close
  pub fn same(&self) -> bool {
    self.open == self.close
  }

  pub fn open_len(&self) -> usize {
    self.open.chars().count()
  }

  pub fn close_len(&self) -> usize {
    self.close.chars().count()
  }

  fn open_char(&self) -> Option<char> {
    single_char(self.open)
  }

  fn close_char(&self) -> Option<char> {
    single_char(self.close)
  }
}

fn single_char(token: &str) -> Option<char> {
  let mut chars = token.chars();
  match (chars.next(), chars.next()) {
    (Some(ch), None) => Some(ch),
    _ => None,
  }
}

pub const STRUCTURAL_PAIRS: &[Pair] = &[
  Pair::structural("(", ")"),
  Pair::structural("{", "}"),
  Pair::structural("[", "]"),
  Pair::structural("<", ">"),
];

/// String pairs, longest token first.
pub const STRING_PAIRS: &[Pair] = &[
  Pair::string("\"\"\""),
  Pair::string("'''"),
  Pair::string("\""),
  Pair::string("'"),
  Pair::string("`"),
];

/// Every pair, longest token first, so that a scan trying them in order picks
/// triple quotes before single ones.
pub const ALL_PAIRS: &[Pair] = &[
  Pair::string("\"\"\""),
  Pair::string("'''"),
  Pair::structural("(", ")"),
  Pair::structural("{", "}"),
  Pair::structural("[", "]"),
  Pair::structural("<", ">"),
  Pair::string("\""),
  Pair::string("'"),
  Pair::string("`"),
];

pub fn structural_opener(ch: char) -> Option<&'static Pair> {
  STRUCTURAL_PAIRS
    .iter()
    .find(|pair| pair.open_char() == Some(ch))
}

pub fn structural_closer(ch: char) -> Option<&'static Pair> {
  STRUCTURAL_PAIRS
    .iter()
    .find(|pair| pair.close_char() == Some(ch))
}

/// Returns true if `token` occurs unescaped at `start`.
pub fn token_at(chars: &[char], start: usize, token: &str) -> bool {
  let len = token.chars().count();
  if len == 0 || start + len > chars.len() {
    return false;
  }
  chars[start..start + len].iter().copied().eq(token.chars()) && !char_is_escaped(chars, start)
}

/// The longest string token starting at `idx`.
pub fn string_token_at(chars: &[char], idx: usize) -> Option<&'static Pair> {
  STRING_PAIRS
    .iter()
    .find(|pair| token_at(chars, idx, pair.open))
}

/// The longest string token whose last char is at `idx`, with its start.
pub fn string_token_ending_at(chars: &[char], idx: usize) -> Option<(usize, &'static Pair)> {
  STRING_PAIRS.iter().find_map(|pair| {
    let start = (idx + 1).checked_sub(pair.open_len())?;
    token_at(chars, start, pair.open).then_some((start, pair))
  })
}

/// First unescaped occurrence of `token` starting at or after `from`.
pub fn find_token(chars: &[char], from: usize, token: &str) -> Option<usize> {
  (from..chars.len()).find(|&idx| token_at(chars, idx, token))
}

/// Last unescaped occurrence of `token` that ends at or before `end`.
pub fn rfind_token(chars: &[char], end: usize, token: &str) -> Option<usize> {
  let len = token.chars().count();
  let last_start = end.min(chars.len()).checked_sub(len)?;
  (0..=last_start)
    .rev()
    .find(|&idx| token_at(chars, idx, token))
}
