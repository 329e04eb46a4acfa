use std::path::Path;

use eyre::{
  Result,
  WrapErr,
};
use log::LevelFilter;

/// Maps repeated `-v` flags to a level. Warnings are always shown.
pub fn level_for(verbosity: u8) -> LevelFilter {
  match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

/// Installs the global logger, writing to `log_file` or stderr.
///
/// Library crates log through `tracing`, whose events are forwarded to `log`
/// when no subscriber is installed, so they end up here too.
pub fn setup_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
  let base = fern::Dispatch::new()
    .level(level_for(verbosity))
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    });

  let base = match log_file {
    Some(path) => {
      let file = fern::log_file(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
      base.chain(file)
    },
    None => base.chain(std::io::stderr()),
  };

  base.apply().wrap_err("failed to install logger")
}
