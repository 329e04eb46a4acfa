//! Read-only capabilities the core needs from a host document.
//!
//! The dispatcher never touches a concrete editor type. It reads lines
//! through [`LineSource`], reads carets through [`SelectionSource`], and
//! issues its single decision through [`crate::action::EditCommandSink`].

use std::borrow::Cow;

use ropey::Rope;
use tabout_core::line_ending::{
  line_without_line_ending,
  str_without_line_ending,
};

use crate::selection::Selection;

/// An ordered sequence of lines.
///
/// Lines are returned without their terminator. Rows past the end of the
/// document read as empty lines.
pub trait LineSource {
  fn line_count(&self) -> usize;

  fn line(&self, row: usize) -> Cow<'_, str>;

  /// Length of the line in chars.
  fn line_len(&self, row: usize) -> usize {
    self.line(row).chars().count()
  }

  /// The line as chars, for index based scanning.
  fn line_chars(&self, row: usize) -> Vec<char> {
    self.line(row).chars().collect()
  }
}

/// The host's current carets and selections.
pub trait SelectionSource {
  fn selection(&self) -> Selection;
}

impl LineSource for Rope {
  fn line_count(&self) -> usize {
    self.len_lines()
  }

  fn line(&self, row: usize) -> Cow<'_, str> {
    line_without_line_ending(self, row).into()
  }

  fn line_len(&self, row: usize) -> usize {
    line_without_line_ending(self, row).len_chars()
  }
}

impl<S: AsRef<str>> LineSource for [S] {
  fn line_count(&self) -> usize {
    self.len()
  }

  fn line(&self, row: usize) -> Cow<'_, str> {
    match self.get(row) {
      Some(line) => Cow::Borrowed(str_without_line_ending(line.as_ref())),
      None => Cow::Borrowed(""),
    }
  }
}

impl<S: AsRef<str>> LineSource for Vec<S> {
  fn line_count(&self) -> usize {
    self.as_slice().line_count()
  }

  fn line(&self, row: usize) -> Cow<'_, str> {
    self.as_slice().line(row)
  }
}

impl<T: LineSource + ?Sized> LineSource for &T {
  fn line_count(&self) -> usize {
    (**self).line_count()
  }

  fn line(&self, row: usize) -> Cow<'_, str> {
    (**self).line(row)
  }

  fn line_len(&self, row: usize) -> usize {
    (**self).line_len(row)
  }
}
