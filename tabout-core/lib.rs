//! Character and line primitives shared by the tabout crates.

pub mod chars;
pub mod line_ending;

/// The character that escapes the one following it in quoted text.
pub const ESCAPE_CHAR: char = '\\';
