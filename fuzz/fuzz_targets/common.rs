use ropey::Rope;
use tabout_lib::{
  position::Position,
  selection::{
    Range,
    Selection,
  },
};

const MAX_TEXT_BYTES: usize = 8 * 1024;
const MAX_RANGES: usize = 16;

pub struct Scenario {
  pub text:      Rope,
  pub selection: Selection,
  /// Scanner window, kept small so the bound is exercised.
  pub window:    usize,
  pub max_gap:   usize,
}

pub fn scenario_from_bytes(data: &[u8]) -> Scenario {
  let mut input = Input(data);
  let window = input.number(8);
  let max_gap = input.number(80);
  let text_len = input.number(MAX_TEXT_BYTES);
  let text = Rope::from_str(&String::from_utf8_lossy(input.take(text_len)));

  let rows = text.len_lines() + 2;
  let range_count = input.number(MAX_RANGES).max(1);
  let mut ranges = Vec::with_capacity(range_count);
  for _ in 0..range_count {
    let anchor = input.position(rows);
    // Mostly carets, the dispatcher only scans for those.
    let head = if input.byte() % 4 == 0 {
      input.position(rows)
    } else {
      anchor
    };
    ranges.push(Range::new(anchor, head));
  }

  Scenario {
    text,
    selection: Selection::new(ranges).unwrap_or_else(|_| Selection::point(Position::zero())),
    window,
    max_gap,
  }
}

/// Fuzz bytes consumed from the front; reads past the end yield zeroes.
struct Input<'a>(&'a [u8]);

impl<'a> Input<'a> {
  fn byte(&mut self) -> u8 {
    match self.0.split_first() {
      Some((&byte, rest)) => {
        self.0 = rest;
        byte
      },
      None => 0,
    }
  }

  /// A number in `0..=max`.
  fn number(&mut self, max: usize) -> usize {
    let raw = u16::from_le_bytes([self.byte(), self.byte()]) as usize;
    raw % max.saturating_add(1)
  }

  /// Rows may run two past the text, columns past any line.
  fn position(&mut self, rows: usize) -> Position {
    let row = self.number(u16::MAX as usize) % rows;
    Position::new(row, self.byte() as usize)
  }

  fn take(&mut self, len: usize) -> &'a [u8] {
    let (head, rest) = self.0.split_at(len.min(self.0.len()));
    self.0 = rest;
    head
  }
}
