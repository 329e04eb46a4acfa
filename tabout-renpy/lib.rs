//! Indentation leveling for Ren'Py scripts.
//!
//! Independent of the smart tab core: lines are classified with regexes and
//! re-indented by block depth.

pub mod indent;

pub use indent::{
  IndentEdit,
  IndentOptions,
  apply_edits,
  format,
  format_rope,
};
