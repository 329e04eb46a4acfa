use crate::ESCAPE_CHAR;

/// Whitespace as far as line classification is concerned.
///
/// This is the Unicode `White_Space` property, which is what trimming a line
/// strips. Line endings count as whitespace too, although the lines handed
/// around by the text accessors never contain them.
#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  ch.is_whitespace()
}

/// Returns true if the text is empty or whitespace only.
#[inline]
pub fn str_is_blank(text: &str) -> bool {
  text.chars().all(char_is_whitespace)
}

/// Returns true if the char at `idx` is preceded by an odd run of escape
/// characters.
///
/// `\"` is escaped, `\\"` is not, `\\\"` is again.
pub fn char_is_escaped(chars: &[char], idx: usize) -> bool {
  let idx = idx.min(chars.len());
  let run = chars[..idx]
    .iter()
    .rev()
    .take_while(|&&ch| ch == ESCAPE_CHAR)
    .count();
  run % 2 == 1
}
