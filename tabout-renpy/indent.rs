use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use ropey::Rope;
use serde::{
  Deserialize,
  Serialize,
};
use tabout_core::line_ending::{
  line_without_line_ending,
  str_without_line_ending,
};

/// The indent unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct IndentOptions {
  pub tab_width:     usize,
  pub insert_spaces: bool,
}

impl Default for IndentOptions {
  fn default() -> Self {
    Self {
      tab_width:     4,
      insert_spaces: true,
    }
  }
}

impl IndentOptions {
  /// One level of indentation.
  pub fn unit(&self) -> String {
    self.indentation(1)
  }

  pub fn indentation(&self, level: usize) -> String {
    if self.insert_spaces {
      " ".repeat(level * self.tab_width)
    } else {
      "\t".repeat(level)
    }
  }
}

/// Replace the first `replace_len` chars of `line` with `indent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentEdit {
  pub line:        usize,
  pub replace_len: usize,
  pub indent:      String,
}

static BRANCH: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^(elif|else)\b").expect("branch regex should compile"));

static BLOCK_OPENER: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^(label|menu|screen|if|while|for|python|define)\b.*:$")
    .expect("block opener regex should compile")
});

static ZERO_LEVEL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^(label|screen|init|define)\b").expect("zero level regex should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
  /// `elif`/`else`: one level out, the block after it stays at the current
  /// level.
  Branch,
  /// Opens a block, the following lines go one level in.
  BlockOpener,
  /// A top level statement without a block; what follows is at level 0.
  ZeroLevel,
  Plain,
}

fn classify(trimmed: &str) -> LineKind {
  if BRANCH.is_match(trimmed) {
    LineKind::Branch
  } else if BLOCK_OPENER.is_match(trimmed) {
    LineKind::BlockOpener
  } else if ZERO_LEVEL.is_match(trimmed) && !trimmed.ends_with(':') {
    LineKind::ZeroLevel
  } else {
    LineKind::Plain
  }
}

/// Computes the edits that bring every non-blank line to its block level.
///
/// Lines whose indentation is already right produce no edit.
pub fn format<I, S>(lines: I, options: &IndentOptions) -> Vec<IndentEdit>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut edits = Vec::new();
  let mut level = 0usize;

  for (idx, line) in lines.into_iter().enumerate() {
    let text = str_without_line_ending(line.as_ref());
    let trimmed = text.trim();
    if trimmed.is_empty() {
      continue;
    }

    let kind = classify(trimmed);
    let target_level = match kind {
      LineKind::Branch => level.saturating_sub(1),
      _ => level,
    };

    let indent_end = text
      .char_indices()
      .find(|(_, ch)| !ch.is_whitespace())
      .map_or(text.len(), |(byte, _)| byte);
    let current = &text[..indent_end];
    let target = options.indentation(target_level);

    if current != target {
      tracing::trace!("line {idx}: level {target_level}, replacing {current:?}");
      edits.push(IndentEdit {
        line:        idx,
        replace_len: current.chars().count(),
        indent:      target,
      });
    }

    match kind {
      LineKind::BlockOpener => level += 1,
      LineKind::ZeroLevel => level = 0,
      LineKind::Branch | LineKind::Plain => {},
    }
  }

  tracing::debug!("renpy indent: {} edits", edits.len());
  edits
}

pub fn format_rope(text: &Rope, options: &IndentOptions) -> Vec<IndentEdit> {
  format(
    (0..text.len_lines()).map(|row| Cow::<str>::from(line_without_line_ending(text, row))),
    options,
  )
}

/// Applies edits produced by [`format`]. Edits for rows past the end of the
/// text are ignored.
pub fn apply_edits(text: &mut Rope, edits: &[IndentEdit]) {
  let mut edits: Vec<&IndentEdit> = edits.iter().collect();
  edits.sort_by_key(|edit| edit.line);

  for edit in edits.into_iter().rev() {
    if edit.line >= text.len_lines() {
      continue;
    }
    let start = text.line_to_char(edit.line);
    let line_len = line_without_line_ending(text, edit.line).len_chars();
    text.remove(start..start + edit.replace_len.min(line_len));
    text.insert(start, &edit.indent);
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn reindent(source: &str, options: &IndentOptions) -> String {
    let mut text = Rope::from(source);
    let edits = format_rope(&text, options);
    apply_edits(&mut text, &edits);
    text.to_string()
  }

  #[test]
  fn test_classify() {
    assert_eq!(classify("label start:"), LineKind::BlockOpener);
    assert_eq!(classify("menu:"), LineKind::BlockOpener);
    assert_eq!(classify("if flag:"), LineKind::BlockOpener);
    assert_eq!(classify("elif other:"), LineKind::Branch);
    assert_eq!(classify("else:"), LineKind::Branch);
    assert_eq!(classify("define e = Character(\"Eileen\")"), LineKind::ZeroLevel);
    assert_eq!(classify("init python:"), LineKind::Plain);
    assert_eq!(classify("labelled thing:"), LineKind::Plain);
    assert_eq!(classify("e \"Hello\""), LineKind::Plain);
  }

  #[test]
  fn test_script() {
    let source = "\
define e = Character(\"Eileen\")
    label start:
e \"Hi.\"
  menu:
\"Yes\":
        jump yes
";
    let expected = "\
define e = Character(\"Eileen\")
label start:
    e \"Hi.\"
    menu:
        \"Yes\":
        jump yes
";
    assert_eq!(reindent(source, &IndentOptions::default()), expected);
  }

  #[test]
  fn test_branches_sit_one_level_out() {
    let source = "label start:\nif a:\nx\nelif b:\ny\nelse:\nz\n";
    let expected = "\
label start:
  if a:
    x
  elif b:
    y
  else:
    z
";
    let options = IndentOptions {
      tab_width:     2,
      insert_spaces: true,
    };
    assert_eq!(reindent(source, &options), expected);
  }

  #[test]
  fn test_branch_at_top_level_stays_at_zero() {
    let edits = format(["  else:", "x"], &IndentOptions::default());
    assert_eq!(
      edits,
      [IndentEdit {
        line:        0,
        replace_len: 2,
        indent:      String::new(),
      }]
    );
  }

  #[test]
  fn test_zero_level_keyword_resets() {
    let source = "label a:\n    if x:\n        y\n        define z = 1\nw\n";
    let edits = format(source.lines(), &IndentOptions::default());
    // After `define` the level drops back to 0, so `w` is already right.
    assert!(edits.is_empty(), "{edits:?}");
  }

  #[test]
  fn test_tabs() {
    let options = IndentOptions {
      tab_width:     8,
      insert_spaces: false,
    };
    assert_eq!(reindent("screen s:\n    text \"a\"\n", &options), "screen s:\n\ttext \"a\"\n");
    assert_eq!(options.unit(), "\t");
  }

  #[test]
  fn test_blank_lines_are_skipped() {
    let edits = format(["label a:", "   ", "", "    b"], &IndentOptions::default());
    assert!(edits.is_empty());
  }

  #[test]
  fn test_crlf_lines() {
    let text = Rope::from("label a:\r\nb\r\n");
    let edits = format_rope(&text, &IndentOptions::default());
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].line, 1);
    assert_eq!(edits[0].replace_len, 0);
  }

  #[test]
  fn test_apply_ignores_out_of_range() {
    let mut text = Rope::from("a\n");
    apply_edits(&mut text, &[IndentEdit {
      line:        9,
      replace_len: 1,
      indent:      "  ".into(),
    }]);
    assert_eq!(text.to_string(), "a\n");
  }

  #[test]
  fn test_options_from_toml() {
    let options: IndentOptions = toml::from_str("tab-width = 2").unwrap();
    assert_eq!(options, IndentOptions {
      tab_width:     2,
      insert_spaces: true,
    });
    assert!(toml::from_str::<IndentOptions>("width = 2").is_err());
  }

  quickcheck::quickcheck! {
      fn test_format_is_idempotent(lines: Vec<String>) -> bool {
          let source = lines.join("\n");
          let options = IndentOptions::default();
          let once = reindent(&source, &options);
          format_rope(&Rope::from(once.as_str()), &options).is_empty()
      }
  }
}
