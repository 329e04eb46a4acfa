use std::path::PathBuf;

use clap::{
  ArgAction,
  Args,
  Parser,
  Subcommand,
};
use tabout_lib::{
  position::Position,
  selection::Range,
};

#[derive(Debug, Parser)]
#[command(name = "tabout")]
#[command(about = "Context-sensitive tab key: indent, jump out of or into delimiter pairs")]
pub struct Cli {
  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count, global = true)]
  pub verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE", global = true)]
  pub log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
  pub config_file: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Press tab once in FILE and show what happened
  Tab(TabArgs),
  /// Re-indent a Ren'Py script
  Format(FormatArgs),
}

#[derive(Debug, Args)]
pub struct TabArgs {
  /// File to edit
  #[arg(required_unless_present = "no_editor")]
  pub file: Option<PathBuf>,

  /// Caret (`ROW:COL`) or selection (`ROW:COL-ROW:COL`), 1-based; repeatable,
  /// the first one is primary
  #[arg(long = "cursor", value_name = "RANGE", value_parser = parse_range)]
  pub cursors: Vec<Range>,

  /// Print the chosen action as JSON instead of the edited text
  #[arg(long)]
  pub print_action: bool,

  /// Trigger without an open document
  #[arg(long, conflicts_with_all = ["file", "cursors"])]
  pub no_editor: bool,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
  /// Script to format
  pub file: PathBuf,

  /// Write the result back to FILE instead of printing it
  #[arg(short = 'i', long)]
  pub in_place: bool,
}

fn parse_position(value: &str) -> Result<Position, String> {
  let (row, col) = value
    .split_once(':')
    .ok_or_else(|| format!("expected ROW:COL, got '{value}'"))?;
  let row: usize = row
    .trim()
    .parse()
    .map_err(|_| format!("invalid row in '{value}'"))?;
  let col: usize = col
    .trim()
    .parse()
    .map_err(|_| format!("invalid column in '{value}'"))?;
  if row == 0 || col == 0 {
    return Err(format!("positions are 1-based, got '{value}'"));
  }
  Ok(Position::new(row - 1, col - 1))
}

pub fn parse_range(value: &str) -> Result<Range, String> {
  match value.split_once('-') {
    Some((anchor, head)) => Ok(Range::new(parse_position(anchor)?, parse_position(head)?)),
    None => parse_position(value).map(Range::point),
  }
}

/// Formats a position the way `--cursor` takes it.
pub fn display_position(pos: Position) -> String {
  format!("{}:{}", pos.row + 1, pos.col + 1)
}
