//! Command-line host for the smart tab.
//!
//! `tabout tab` loads a file, places the given carets, presses tab once and
//! prints the result. `tabout format` re-indents a Ren'Py script.

mod buffer;
mod cli;
mod config;
mod logging;

use std::{
  fs,
  io::{
    self,
    Write,
  },
  path::Path,
};

use clap::Parser;
use eyre::{
  Result,
  WrapErr,
};
use ropey::Rope;
use serde::Serialize;
use tabout_lib::{
  Outcome,
  action::{
    Action,
    Reveal,
  },
  selection::Selection,
  smart_tab,
};

use crate::{
  buffer::{
    Buffer,
    Snapshot,
  },
  cli::{
    Cli,
    Command,
    FormatArgs,
    TabArgs,
    display_position,
  },
  config::Config,
};

#[derive(Debug, Serialize)]
struct Report {
  outcome:  &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  action:   Option<Action>,
  #[serde(skip_serializing_if = "Option::is_none")]
  reveal:   Option<Reveal>,
  warnings: Vec<String>,
}

impl Report {
  fn new(outcome: Outcome, buffer: &Buffer) -> Self {
    let (outcome, action) = match outcome {
      Outcome::Disabled => ("disabled", None),
      Outcome::NoEditor => ("no-editor", None),
      Outcome::Performed(action) => ("performed", Some(action)),
    };
    Self {
      outcome,
      action,
      reveal: buffer.reveal,
      warnings: buffer.warnings.clone(),
    }
  }
}

fn read_rope(path: &Path) -> Result<Rope> {
  let text =
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
  Ok(Rope::from(text))
}

fn run_tab(args: TabArgs, config: &Config) -> Result<()> {
  let (outcome, buffer) = match args.file.as_deref() {
    Some(path) if !args.no_editor => {
      let text = read_rope(path)?;
      let selection = if args.cursors.is_empty() {
        Selection::point(Default::default())
      } else {
        Selection::new(args.cursors.iter().copied())?
      };
      let mut buffer = Buffer::new(text, selection, config.indent);
      let snapshot = buffer.snapshot();
      let outcome = smart_tab(Some(&snapshot), &config.smart_tab, &mut buffer);
      (outcome, buffer)
    },
    _ => {
      let mut buffer = Buffer::new(Rope::new(), Selection::point(Default::default()), config.indent);
      let outcome = smart_tab::<Snapshot, _>(None, &config.smart_tab, &mut buffer);
      (outcome, buffer)
    },
  };
  log::info!("tab: {outcome:?}");

  let mut stdout = io::stdout().lock();
  if args.print_action {
    let report = Report::new(outcome, &buffer);
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;
    return Ok(());
  }

  for warning in &buffer.warnings {
    eprintln!("warning: {warning}");
  }
  if outcome == Outcome::NoEditor {
    return Ok(());
  }

  write!(stdout, "{}", buffer.text)?;
  if !buffer.text.to_string().ends_with('\n') {
    writeln!(stdout)?;
  }
  for range in &buffer.selection {
    if range.is_empty() {
      writeln!(stdout, "cursor {}", display_position(range.head))?;
    } else {
      writeln!(
        stdout,
        "cursor {}-{}",
        display_position(range.anchor),
        display_position(range.head)
      )?;
    }
  }
  Ok(())
}

fn run_format(args: FormatArgs, config: &Config) -> Result<()> {
  let mut text = read_rope(&args.file)?;
  let edits = tabout_renpy::format_rope(&text, &config.indent);
  log::info!("format {}: {} edits", args.file.display(), edits.len());
  tabout_renpy::apply_edits(&mut text, &edits);

  if args.in_place {
    let file = fs::File::create(&args.file)
      .wrap_err_with(|| format!("failed to write {}", args.file.display()))?;
    text.write_to(io::BufWriter::new(file))?;
  } else {
    let mut stdout = io::stdout().lock();
    text.write_to(&mut stdout)?;
  }
  Ok(())
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  logging::setup_logging(cli.verbosity, cli.log_file.as_deref())?;

  let config = Config::load(cli.config_file.as_deref()).wrap_err("failed to load config")?;
  log::debug!("config: {config:?}");

  match cli.command {
    Command::Tab(args) => run_tab(args, &config),
    Command::Format(args) => run_format(args, &config),
  }
}
