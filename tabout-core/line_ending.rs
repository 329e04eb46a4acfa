//! Line terminators as ropey splits them.
//!
//! The text accessors hand out lines without their terminator, so a caret at
//! `line.len()` sits at the end of the content. These helpers strip whichever
//! terminator ropey used to split the line. CR, LF and CRLF are always line
//! breaks; the remaining Unicode breaks only with the `unicode-lines`
//! feature, matching ropey's `unicode_lines`.

use ropey::{
  Rope,
  RopeSlice,
};

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum LineEnding {
  /// CarriageReturn followed by LineFeed.
  Crlf,
  /// U+000A -- LineFeed
  LF,
  /// U+000D -- CarriageReturn
  CR,
  #[cfg(feature = "unicode-lines")]
  /// U+000B -- VerticalTab
  VT,
  #[cfg(feature = "unicode-lines")]
  /// U+000C -- FormFeed
  FF,
  #[cfg(feature = "unicode-lines")]
  /// U+0085 -- NextLine
  Nel,
  #[cfg(feature = "unicode-lines")]
  /// U+2028 -- Line Separator
  LS,
  #[cfg(feature = "unicode-lines")]
  /// U+2029 -- ParagraphSeparator
  PS,
}

impl LineEnding {
  #[inline]
  pub const fn len_chars(&self) -> usize {
    match self {
      Self::Crlf => 2,
      _ => 1,
    }
  }

  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Crlf => "\r\n",
      Self::LF => "\n",
      Self::CR => "\r",
      #[cfg(feature = "unicode-lines")]
      Self::VT => "\u{000B}",
      #[cfg(feature = "unicode-lines")]
      Self::FF => "\u{000C}",
      #[cfg(feature = "unicode-lines")]
      Self::Nel => "\u{0085}",
      #[cfg(feature = "unicode-lines")]
      Self::LS => "\u{2028}",
      #[cfg(feature = "unicode-lines")]
      Self::PS => "\u{2029}",
    }
  }

  #[inline]
  pub const fn from_char(ch: char) -> Option<LineEnding> {
    match ch {
      '\n' => Some(Self::LF),
      '\r' => Some(Self::CR),
      #[cfg(feature = "unicode-lines")]
      '\u{000B}' => Some(Self::VT),
      #[cfg(feature = "unicode-lines")]
      '\u{000C}' => Some(Self::FF),
      #[cfg(feature = "unicode-lines")]
      '\u{0085}' => Some(Self::Nel),
      #[cfg(feature = "unicode-lines")]
      '\u{2028}' => Some(Self::LS),
      #[cfg(feature = "unicode-lines")]
      '\u{2029}' => Some(Self::PS),
      _ => None,
    }
  }
}

/// Returns the line ending the text ends with, if any.
pub fn get_line_ending_of_str(line: &str) -> Option<LineEnding> {
  if line.ends_with("\r\n") {
    return Some(LineEnding::Crlf);
  }
  line.chars().next_back().and_then(LineEnding::from_char)
}

/// Returns the passed line's line ending, if any.
pub fn get_line_ending(line: &RopeSlice) -> Option<LineEnding> {
  let len = line.len_chars();
  let last = line.get_char(len.checked_sub(1)?)?;
  if last == '\n' && len >= 2 && line.get_char(len - 2) == Some('\r') {
    return Some(LineEnding::Crlf);
  }
  LineEnding::from_char(last)
}

/// The text with a single trailing line ending removed.
pub fn str_without_line_ending(line: &str) -> &str {
  match get_line_ending_of_str(line) {
    Some(ending) => &line[..line.len() - ending.as_str().len()],
    None => line,
  }
}

/// Get line `line_idx` of the rope, sans any line ending.
///
/// Out of range lines are empty.
pub fn line_without_line_ending(text: &Rope, line_idx: usize) -> RopeSlice<'_> {
  let Some(line) = text.get_line(line_idx) else {
    return text.slice(0..0);
  };
  let end = line.len_chars() - get_line_ending(&line).map_or(0, |le| le.len_chars());
  line.slice(..end)
}

#[cfg(test)]
mod line_ending_tests {
  use super::*;

  #[test]
  fn test_get_line_ending_of_str() {
    let text = "Hello\rworld\nhow\r\nare you?";

    assert_eq!(get_line_ending_of_str(&text[..6]), Some(LineEnding::CR));
    assert_eq!(get_line_ending_of_str(&text[..12]), Some(LineEnding::LF));
    assert_eq!(get_line_ending_of_str(&text[..17]), Some(LineEnding::Crlf));
    assert_eq!(get_line_ending_of_str(text), None);
    assert_eq!(get_line_ending_of_str(""), None);
  }

  #[test]
  fn test_get_line_ending_rope_slice() {
    let r = Rope::from_str("Hello\rworld\nhow\r\nare you?");

    assert_eq!(get_line_ending(&r.slice(..6)), Some(LineEnding::CR));
    assert_eq!(get_line_ending(&r.slice(..12)), Some(LineEnding::LF));
    assert_eq!(get_line_ending(&r.slice(..17)), Some(LineEnding::Crlf));
    assert_eq!(get_line_ending(&r.slice(..)), None);
    assert_eq!(get_line_ending(&r.slice(0..0)), None);
  }

  #[test]
  fn test_str_without_line_ending() {
    assert_eq!(str_without_line_ending("foo\r\n"), "foo");
    assert_eq!(str_without_line_ending("foo\n"), "foo");
    assert_eq!(str_without_line_ending("foo\n\n"), "foo\n");
    assert_eq!(str_without_line_ending("foo"), "foo");
  }

  #[test]
  fn test_line_without_line_ending() {
    let r = Rope::from_str("one\r\ntwo\nthree");

    assert_eq!(line_without_line_ending(&r, 0), "one");
    assert_eq!(line_without_line_ending(&r, 1), "two");
    assert_eq!(line_without_line_ending(&r, 2), "three");
    assert_eq!(line_without_line_ending(&r, 9), "");
  }

  #[test]
  fn test_unicode_breaks_follow_rope() {
    let r = Rope::from_str("a\u{000B}b\u{2028}c");
    let expected: &[&str] = if cfg!(feature = "unicode-lines") {
      &["a", "b", "c"]
    } else {
      &["a\u{000B}b\u{2028}c"]
    };

    assert_eq!(r.len_lines(), expected.len());
    for (idx, line) in expected.iter().enumerate() {
      assert_eq!(line_without_line_ending(&r, idx), *line);
      assert_eq!(str_without_line_ending(&r.line(idx).to_string()), *line);
    }
  }
}
