//! The smart tab decision tree.
//!
//! A trigger gathers every input from the live document and selection set,
//! picks exactly one [`Action`] with [`decide`] and hands it to the host.
//! Nothing is kept between triggers.
//!
//! Rules, first match wins:
//!
//! 1. Any non-empty selection indents the selected block.
//! 2. All carets on one line:
//!    1. several carets not at line end indent once and outdent the extras,
//!    2. (opt-in) inside a pair with a closer right ahead jumps out,
//!    3. a caret on a blank line inserts a tab,
//!    4. a caret in leading whitespace indents,
//!    5. a caret inside a pair jumps past its closer,
//!    6. a complete pair to the right is jumped into,
//!    7. a caret at line end moves right.
//! 3. More lines than ranges, not at line end, indents.
//! 4. Otherwise a tab is inserted.

use crate::{
  action::{
    Action,
    EditCommandSink,
    execute,
  },
  config::SmartTabConfig,
  geometry::{
    is_at_start_of_content,
    is_cursor_at_end_of_line,
    is_line_purely_whitespace,
    selected_line_count,
  },
  position::Position,
  probe::{
    PairAhead,
    has_close_delimiter_ahead,
    has_pair_delimiter_right,
  },
  scanner::{
    PairScanner,
    ScanResult,
  },
  selection::Selection,
  text::{
    LineSource,
    SelectionSource,
  },
};

/// Caret-line facts, only gathered when the selection set covers one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineContext {
  pub caret:               Position,
  /// Nothing but whitespace before the caret.
  pub at_start_of_content: bool,
  pub pair_ahead:          Option<PairAhead>,
  pub close_ahead:         bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchInputs {
  pub selected_line_count:     usize,
  pub selection_count:         usize,
  pub has_non_empty_selection: bool,
  pub is_end_of_line:          bool,
  pub is_whitespace_only_line: bool,
  /// Scan around the primary caret.
  pub scan:                    ScanResult,
  pub line:                    Option<LineContext>,
}

/// Derives the dispatcher inputs from one snapshot of text and selections.
pub fn gather<T>(text: &T, selection: &Selection, config: &SmartTabConfig) -> DispatchInputs
where
  T: LineSource + ?Sized,
{
  let primary = selection.primary();
  let caret = primary.head;
  let caret_line = text.line(caret.row);
  let selected_line_count = selected_line_count(selection);

  let scan = PairScanner::new(text)
    .with_window(config.search_lines)
    .scan_range(&primary);

  let line = (selected_line_count == 1).then(|| {
    LineContext {
      caret,
      at_start_of_content: is_at_start_of_content(text, caret),
      pair_ahead: has_pair_delimiter_right(&caret_line, caret.col),
      close_ahead: has_close_delimiter_ahead(&caret_line, caret.col, config.max_gap),
    }
  });

  DispatchInputs {
    selected_line_count,
    selection_count: selection.len(),
    has_non_empty_selection: selection.has_non_empty_range(),
    is_end_of_line: is_cursor_at_end_of_line(text, selection),
    is_whitespace_only_line: is_line_purely_whitespace(&caret_line),
    scan,
    line,
  }
}

/// Picks the action for one trigger.
pub fn decide(inputs: &DispatchInputs, config: &SmartTabConfig) -> Action {
  let (action, rule) = decide_with_rule(inputs, config);
  tracing::debug!("smart tab rule {rule:?} -> {action:?}");
  action
}

fn decide_with_rule(inputs: &DispatchInputs, config: &SmartTabConfig) -> (Action, &'static str) {
  if inputs.has_non_empty_selection {
    return (Action::IndentBlock, "non-empty selection");
  }

  if inputs.selected_line_count == 1 {
    if inputs.selected_line_count < inputs.selection_count && !inputs.is_end_of_line {
      let outdents = inputs.selection_count - 1;
      return (Action::IndentThenOutdent { outdents }, "carets share a line");
    }

    let line = inputs.line;
    let at_start = line.is_some_and(|line| line.at_start_of_content);

    if config.eager_jump_out
      && line.is_some_and(|line| line.close_ahead)
      && let Some(target) = inputs.scan.close_position()
    {
      return (Action::JumpOut { target }, "closer ahead");
    }

    if at_start && inputs.is_end_of_line {
      return (Action::InsertTab, "blank line");
    }

    if at_start {
      return (Action::IndentBlock, "start of content");
    }

    if let Some(target) = inputs.scan.close_position() {
      return (Action::JumpOut { target }, "inside pair");
    }

    if let Some(line) = line
      && let Some(ahead) = line.pair_ahead
    {
      let target = line.caret.with_col(ahead.inner_col());
      return (Action::JumpInto { target }, "pair ahead");
    }

    if inputs.is_end_of_line {
      return (Action::MoveCaretRight, "end of line");
    }
  }

  if inputs.selected_line_count > 1
    && inputs.selected_line_count > inputs.selection_count
    && !inputs.is_end_of_line
  {
    return (Action::IndentBlock, "multi-line block");
  }

  (Action::InsertTab, "fallback")
}

/// What a trigger ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// The smart tab is off, the host's default tab ran instead.
  Disabled,
  /// There was no document to act on.
  NoEditor,
  Performed(Action),
}

/// Runs one trigger: gather, decide, execute.
///
/// `doc` is `None` when the host has no active editing surface.
pub fn smart_tab<D, S>(doc: Option<&D>, config: &SmartTabConfig, sink: &mut S) -> Outcome
where
  D: LineSource + SelectionSource + ?Sized,
  S: EditCommandSink + ?Sized,
{
  if !config.enable {
    tracing::debug!("smart tab disabled, using default tab");
    sink.default_tab();
    return Outcome::Disabled;
  }

  let Some(doc) = doc else {
    tracing::debug!("smart tab triggered without an editor");
    sink.show_warning("No active editor");
    return Outcome::NoEditor;
  };

  let selection = doc.selection();
  let inputs = gather(doc, &selection, config);
  tracing::debug!("smart tab inputs {inputs:?}");

  let action = decide(&inputs, config);
  execute(action, sink);
  Outcome::Performed(action)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{
    delimiters::{
      ALL_PAIRS,
      DelimiterKind,
    },
    selection::Range,
  };

  fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
  }

  fn carets(points: &[(usize, usize)]) -> Selection {
    Selection::new(points.iter().map(|&p| Range::point(p.into()))).unwrap()
  }

  fn decide_for(lines: &[&str], selection: &Selection) -> Action {
    let config = SmartTabConfig::default();
    decide(&gather(lines, selection, &config), &config)
  }

  fn single_line_inputs() -> DispatchInputs {
    DispatchInputs {
      selected_line_count:     1,
      selection_count:         1,
      has_non_empty_selection: false,
      is_end_of_line:          false,
      is_whitespace_only_line: false,
      scan:                    ScanResult::Outside,
      line:                    Some(LineContext {
        caret:               pos(0, 3),
        at_start_of_content: false,
        pair_ahead:          None,
        close_ahead:         false,
      }),
    }
  }

  #[test]
  fn test_non_empty_selection_indents() {
    let lines = ["foo(bar)", "baz"];
    let selection = Selection::new([
      Range::point(pos(0, 4)),
      Range::new(pos(1, 0), pos(1, 2)),
    ])
    .unwrap();
    assert_eq!(decide_for(&lines, &selection), Action::IndentBlock);
  }

  #[test]
  fn test_carets_sharing_a_line() {
    let lines = ["abcdef"];
    assert_eq!(
      decide_for(&lines, &carets(&[(0, 1), (0, 3), (0, 5)])),
      Action::IndentThenOutdent { outdents: 2 }
    );
  }

  #[test]
  fn test_carets_sharing_a_line_at_end() {
    // Every caret at line end: not rule 2a.
    let lines = ["ab", "ab"];
    let selection = carets(&[(0, 2), (0, 2)]);
    assert_eq!(decide_for(&lines, &selection), Action::MoveCaretRight);
  }

  #[test]
  fn test_blank_line_inserts_tab() {
    assert_eq!(decide_for(&["    "], &carets(&[(0, 4)])), Action::InsertTab);
    assert_eq!(decide_for(&[""], &carets(&[(0, 0)])), Action::InsertTab);
  }

  #[test]
  fn test_start_of_content_indents() {
    let lines = ["  return (x);"];
    assert_eq!(decide_for(&lines, &carets(&[(0, 2)])), Action::IndentBlock);
    assert_eq!(decide_for(&lines, &carets(&[(0, 0)])), Action::IndentBlock);
  }

  #[test]
  fn test_inside_pair_jumps_out() {
    let lines = ["x = (", "  a + b", ")"];
    assert_eq!(
      decide_for(&lines, &carets(&[(1, 5)])),
      Action::JumpOut {
        target: pos(2, 1),
      }
    );
  }

  #[test]
  fn test_pair_ahead_jumps_in() {
    let lines = ["foo(bar)"];
    // Column 0 counts as start of content, so step off it first.
    assert_eq!(
      decide_for(&lines, &carets(&[(0, 1)])),
      Action::JumpInto {
        target: pos(0, 4),
      }
    );
  }

  #[test]
  fn test_end_of_line_moves_right() {
    assert_eq!(decide_for(&["let x"], &carets(&[(0, 5)])), Action::MoveCaretRight);
  }

  #[test]
  fn test_fallback_inserts_tab() {
    assert_eq!(decide_for(&["let x"], &carets(&[(0, 3)])), Action::InsertTab);

    // Carets on different lines.
    let lines = ["ab", "cd"];
    assert_eq!(decide_for(&lines, &carets(&[(0, 1), (1, 1)])), Action::InsertTab);
  }

  #[test]
  fn test_multi_line_rule() {
    let config = SmartTabConfig::default();
    let inputs = DispatchInputs {
      selected_line_count: 3,
      selection_count: 2,
      line: None,
      ..single_line_inputs()
    };
    assert_eq!(decide(&inputs, &config), Action::IndentBlock);

    let inputs = DispatchInputs {
      is_end_of_line: true,
      ..inputs
    };
    assert_eq!(decide(&inputs, &config), Action::InsertTab);
  }

  #[test]
  fn test_jump_out_beats_jump_in() {
    let config = SmartTabConfig::default();
    let mut inputs = single_line_inputs();
    inputs.scan = ScanResult::Inside {
      open:  pos(0, 0),
      close: pos(0, 9),
      kind:  DelimiterKind::Structural,
    };
    if let Some(line) = inputs.line.as_mut() {
      line.pair_ahead = Some(PairAhead {
        pair: &ALL_PAIRS[2],
        open: 5,
      });
    }
    assert_eq!(
      decide(&inputs, &config),
      Action::JumpOut {
        target: pos(0, 9),
      }
    );
  }

  #[test]
  fn test_eager_jump_out_precedes_line_start() {
    let lines = ["(", "  )"];
    let selection = carets(&[(1, 1)]);
    let config = SmartTabConfig::default();
    let inputs = gather(&lines[..], &selection, &config);
    assert!(inputs.line.is_some_and(|line| line.close_ahead));
    assert_eq!(decide(&inputs, &config), Action::IndentBlock);

    let eager = SmartTabConfig {
      eager_jump_out: true,
      ..config
    };
    assert_eq!(
      decide(&inputs, &eager),
      Action::JumpOut {
        target: pos(1, 3),
      }
    );
  }

  #[test]
  fn test_line_context_only_for_single_line() {
    let lines = ["(a)", "(b)"];
    let config = SmartTabConfig::default();
    let inputs = gather(&lines[..], &carets(&[(0, 1), (1, 1)]), &config);
    assert_eq!(inputs.selected_line_count, 2);
    assert!(inputs.line.is_none());
    assert!(inputs.scan.is_inside());
  }

  #[test]
  fn test_search_lines_bounds_scan() {
    let lines = ["(", "", "", "", "x", ")"];
    let selection = carets(&[(4, 1)]);
    let config = SmartTabConfig {
      search_lines: 2,
      ..SmartTabConfig::default()
    };
    assert_eq!(gather(&lines[..], &selection, &config).scan, ScanResult::Outside);
  }

  #[test]
  fn test_wide_search_lines_stays_bounded() {
    let mut lines = vec!["("];
    lines.extend(std::iter::repeat_n("x", 5000));
    lines.push(")");
    let config = SmartTabConfig::from_toml("search-lines = 100000").unwrap();

    let inputs = gather(&lines[..], &carets(&[(2500, 0)]), &config);
    assert_eq!(inputs.scan, ScanResult::Outside);
  }

  #[test]
  fn test_whitespace_only_line_is_reported() {
    let config = SmartTabConfig::default();
    let inputs = gather(&["  \t"][..], &carets(&[(0, 1)]), &config);
    assert!(inputs.is_whitespace_only_line);
    assert!(!inputs.is_end_of_line);
  }

  quickcheck::quickcheck! {
      fn test_any_non_empty_selection_indents(
          lines: Vec<String>,
          points: Vec<(u8, u8)>,
          at: usize,
          span: (u8, u8, u8)
      ) -> bool {
          let mut ranges: Vec<Range> = points
              .iter()
              .map(|&(row, col)| Range::point(pos(row as usize, col as usize)))
              .collect();
          let (row, col, len) = span;
          let start = pos(row as usize, col as usize);
          let end = pos(row as usize, col as usize + len as usize + 1);
          ranges.insert(at % (ranges.len() + 1), Range::new(start, end));

          let selection = Selection::new(ranges).unwrap();
          let config = SmartTabConfig::default();
          decide(&gather(&lines, &selection, &config), &config) == Action::IndentBlock
      }
  }
}
