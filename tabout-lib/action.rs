//! The fixed set of editing actions and the host interface that performs them.
//!
//! The core never edits text itself. It picks one [`Action`] per trigger and
//! hands it to [`execute`], which maps it onto the host's
//! [`EditCommandSink`].

use serde::Serialize;

use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "action")]
pub enum Action {
  /// Indent every selected line by one unit.
  IndentBlock,
  /// Indent once, then outdent `outdents` times. Several carets collapsed on
  /// one line each receive the indent, so all but one are taken back.
  IndentThenOutdent { outdents: usize },
  InsertTab,
  MoveCaretRight,
  /// Place the caret just inside an opener to its right.
  JumpInto { target: Position },
  /// Place the caret just past the closer of the enclosing pair.
  JumpOut { target: Position },
  MoveCaretTo { target: Position },
}

impl Action {
  /// Where the caret ends up, for actions that place it directly.
  pub fn target(&self) -> Option<Position> {
    match self {
      Self::JumpInto { target } | Self::JumpOut { target } | Self::MoveCaretTo { target } => {
        Some(*target)
      },
      _ => None,
    }
  }
}

/// How the host should scroll to a caret placed by the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reveal {
  #[default]
  Default,
  /// Center the caret, but only if it left the viewport.
  CenterIfOutside,
}

/// Host editing operations.
pub trait EditCommandSink {
  fn indent_lines(&mut self);
  fn outdent_lines(&mut self);
  /// Insert a tab (or the host's snippet/completion tab behavior).
  fn insert_tab(&mut self);
  /// The host's own tab handling, used when the smart tab is turned off.
  fn default_tab(&mut self) {
    self.insert_tab();
  }
  fn move_cursor_right(&mut self);
  /// Collapse the selection set to a single caret at `pos`.
  fn set_cursor(&mut self, pos: Position, reveal: Reveal);
  fn show_warning(&mut self, message: &str);
}

pub fn execute<S>(action: Action, sink: &mut S)
where
  S: EditCommandSink + ?Sized,
{
  tracing::trace!("executing {action:?}");
  match action {
    Action::IndentBlock => sink.indent_lines(),
    Action::IndentThenOutdent { outdents } => {
      sink.indent_lines();
      for _ in 0..outdents {
        sink.outdent_lines();
      }
    },
    Action::InsertTab => sink.insert_tab(),
    Action::MoveCaretRight => sink.move_cursor_right(),
    Action::JumpInto { target } | Action::MoveCaretTo { target } => {
      sink.set_cursor(target, Reveal::Default)
    },
    Action::JumpOut { target } => sink.set_cursor(target, Reveal::CenterIfOutside),
  }
}
