use std::{
  fmt,
  fs,
  io::Error as IOError,
  path::Path,
};

use serde::Deserialize;
use tabout_lib::SmartTabConfig;
use tabout_renpy::IndentOptions;
use toml::de::Error as TomlError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
  pub smart_tab: SmartTabConfig,
  pub indent:    IndentOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigRaw {
  pub smart_tab: Option<SmartTabConfig>,
  pub indent:    Option<IndentOptions>,
}

#[derive(Debug)]
pub enum ConfigLoadError {
  BadConfig(TomlError),
  Error(IOError),
}

impl fmt::Display for ConfigLoadError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::BadConfig(err) => write!(f, "Bad config: {err}"),
      Self::Error(err) => write!(f, "Failed to read config: {err}"),
    }
  }
}

impl std::error::Error for ConfigLoadError {}

impl Config {
  pub fn from_toml(source: &str) -> Result<Config, ConfigLoadError> {
    let raw: ConfigRaw = toml::from_str(source).map_err(ConfigLoadError::BadConfig)?;
    Ok(Config {
      smart_tab: raw.smart_tab.unwrap_or_default(),
      indent:    raw.indent.unwrap_or_default(),
    })
  }

  /// Loads `path`, or the defaults when no file is given.
  pub fn load(path: Option<&Path>) -> Result<Config, ConfigLoadError> {
    let Some(path) = path else {
      return Ok(Config::default());
    };
    let source = fs::read_to_string(path).map_err(ConfigLoadError::Error)?;
    Self::from_toml(&source)
  }
}

#[cfg(test)]
mod test {
  use std::io::Write;

  use super::*;

  #[test]
  fn test_no_file_is_default() {
    assert_eq!(Config::load(None).unwrap(), Config::default());
  }

  #[test]
  fn test_load_tables() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
      file,
      "[smart-tab]\nmax-gap = 2\neager-jump-out = true\n\n[indent]\ntab-width = 2"
    )
    .unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.smart_tab.max_gap, 2);
    assert!(config.smart_tab.eager_jump_out);
    assert!(config.smart_tab.enable);
    assert_eq!(config.indent.tab_width, 2);
    assert!(config.indent.insert_spaces);
  }

  #[test]
  fn test_bad_config() {
    assert!(matches!(
      Config::from_toml("[smart-tab]\nenabled = false"),
      Err(ConfigLoadError::BadConfig(_))
    ));
    assert!(matches!(
      Config::from_toml("[keys]\n"),
      Err(ConfigLoadError::BadConfig(_))
    ));
  }

  #[test]
  fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(matches!(err, ConfigLoadError::Error(_)));
    assert!(err.to_string().starts_with("Failed to read config"));
  }
}
