//! Carets and multi-caret selection sets.
//!
//! A [`Range`] has two positions: `anchor` and `head`. The `head` is where the
//! caret visually appears, while the `anchor` is the other end of the
//! selection. When `anchor == head`, the range is a caret.
//!
//! ```text
//! anchor=0:2, head=0:7: "he[llo w]orld"  (forward selection)
//! anchor=0:7, head=0:2: "he]llo w[orld"  (backward selection)
//! anchor=0:5, head=0:5: "hello|world"    (caret)
//! ```
//!
//! A [`Selection`] holds one or more ranges in the order the host presented
//! them. Unlike an editor-owned selection it is never sorted or merged: the
//! first range is the primary one, and overlapping carets are meaningful to
//! the dispatcher (several carets on one line are counted individually).

use serde::{
  Deserialize,
  Serialize,
};
use smallvec::{
  SmallVec,
  smallvec,
};
use thiserror::Error;

use crate::position::Position;

pub type Result<T> = std::result::Result<T, SelectionError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
  #[error("selection must contain at least one range")]
  EmptySelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
  /// The anchor of the range: the side that doesn't move when extending.
  pub anchor: Position,
  /// The head of the range, where the caret is drawn.
  pub head:   Position,
}

impl Range {
  pub fn new(anchor: Position, head: Position) -> Self {
    Self { anchor, head }
  }

  pub fn point(pos: Position) -> Self {
    Self::new(pos, pos)
  }

  /// Start of the range regardless of direction.
  #[inline]
  pub fn from(&self) -> Position {
    self.anchor.min(self.head)
  }

  /// End of the range regardless of direction.
  #[inline]
  pub fn to(&self) -> Position {
    self.anchor.max(self.head)
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.anchor == self.head
  }

  /// First and last row the range covers, inclusive.
  ///
  /// A multi-line range ending at column 0 stops on the line before: a drag
  /// to the start of the next line selects through the end of the previous
  /// one.
  pub fn line_span(&self) -> (usize, usize) {
    let (from, to) = (self.from(), self.to());
    if from.row != to.row && to.col == 0 {
      (from.row, to.row - 1)
    } else {
      (from.row, to.row)
    }
  }
}

/// An ordered, non-empty set of ranges. Index 0 is the primary range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
  ranges: SmallVec<[Range; 1]>,
}

impl Selection {
  pub fn new(ranges: impl IntoIterator<Item = Range>) -> Result<Self> {
    let ranges: SmallVec<[Range; 1]> = ranges.into_iter().collect();
    if ranges.is_empty() {
      return Err(SelectionError::EmptySelection);
    }
    Ok(Self { ranges })
  }

  pub fn single(range: Range) -> Self {
    Self {
      ranges: smallvec![range],
    }
  }

  pub fn point(pos: Position) -> Self {
    Self::single(Range::point(pos))
  }

  pub fn primary(&self) -> Range {
    self.ranges[0]
  }

  pub fn ranges(&self) -> &[Range] {
    &self.ranges
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Range> {
    self.ranges.iter()
  }

  pub fn len(&self) -> usize {
    self.ranges.len()
  }

  /// Always false, a selection holds at least one range.
  pub fn is_empty(&self) -> bool {
    false
  }

  pub fn has_non_empty_range(&self) -> bool {
    self.ranges.iter().any(|range| !range.is_empty())
  }
}

impl<'a> IntoIterator for &'a Selection {
  type IntoIter = std::slice::Iter<'a, Range>;
  type Item = &'a Range;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
