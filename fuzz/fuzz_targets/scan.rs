#![no_main]

mod common;

use std::{
  borrow::Cow,
  cell::RefCell,
};

use libfuzzer_sys::fuzz_target;
use ropey::Rope;
use tabout_lib::{
  position::Position,
  scanner::{
    PairScanner,
    ScanResult,
  },
  text::LineSource,
};

use crate::common::scenario_from_bytes;

struct Recording<'a> {
  text: &'a Rope,
  rows: RefCell<Vec<usize>>,
}

impl LineSource for Recording<'_> {
  fn line_count(&self) -> usize {
    self.text.line_count()
  }

  fn line(&self, row: usize) -> Cow<'_, str> {
    self.rows.borrow_mut().push(row);
    LineSource::line(self.text, row)
  }
}

/// Longest distance, in rows, between `caret` and any row read.
fn max_row_distance(rows: &[usize], caret: Position) -> usize {
  rows
    .iter()
    .map(|&row| row.abs_diff(caret.row))
    .max()
    .unwrap_or(0)
}

fuzz_target!(|data: &[u8]| {
  let scenario = scenario_from_bytes(data);
  let text = Recording {
    text: &scenario.text,
    rows: RefCell::new(Vec::new()),
  };

  for range in &scenario.selection {
    text.rows.borrow_mut().clear();
    let result = PairScanner::new(&text)
      .with_window(scenario.window)
      .scan_range(range);

    if let ScanResult::Inside { open, close, .. } = result {
      assert!(range.is_empty());
      assert!(open < close);
      assert!(open.row <= range.head.row && range.head.row <= close.row);
    }
    assert!(max_row_distance(&text.rows.borrow(), range.head) <= scenario.window);
  }
});
