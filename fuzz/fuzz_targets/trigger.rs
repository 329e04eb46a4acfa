#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use tabout_lib::{
  SmartTabConfig,
  action::Action,
  dispatch::{
    decide,
    gather,
  },
};

use crate::common::scenario_from_bytes;

fuzz_target!(|data: &[u8]| {
  let scenario = scenario_from_bytes(data);
  let config = SmartTabConfig {
    max_gap: scenario.max_gap,
    search_lines: scenario.window,
    eager_jump_out: data.first().is_some_and(|byte| byte % 2 == 1),
    ..SmartTabConfig::default()
  };

  let inputs = gather(&scenario.text, &scenario.selection, &config);
  let action = decide(&inputs, &config);

  if scenario.selection.has_non_empty_range() {
    assert_eq!(action, Action::IndentBlock);
  }
  if let Action::JumpOut { target } = action {
    assert!(target >= scenario.selection.primary().head);
  }
});
