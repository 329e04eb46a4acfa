use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::{
  probe::DEFAULT_MAX_GAP,
  scanner::MAX_LINES_TO_SEARCH,
};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
  #[error("invalid smart tab config: {0}")]
  Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Smart tab settings, read once per trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SmartTabConfig {
  /// When false every trigger falls through to the host's own tab.
  pub enable:         bool,
  /// Whitespace allowed between the caret and a closer it can jump over.
  pub max_gap:        usize,
  /// Lines above and below the caret the pair scanner may visit, capped at
  /// [`MAX_LINES_TO_SEARCH`].
  pub search_lines:   usize,
  /// Jump out of a pair before the line-start rules when a closer is right
  /// ahead of the caret.
  pub eager_jump_out: bool,
}

impl Default for SmartTabConfig {
  fn default() -> Self {
    Self {
      enable:         true,
      max_gap:        DEFAULT_MAX_GAP,
      search_lines:   MAX_LINES_TO_SEARCH,
      eager_jump_out: false,
    }
  }
}

impl SmartTabConfig {
  pub fn from_toml(source: &str) -> Result<Self> {
    Ok(toml::from_str(source)?)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_empty_config_is_default() {
    assert_eq!(SmartTabConfig::from_toml("").unwrap(), SmartTabConfig::default());
  }

  #[test]
  fn test_kebab_case_keys() {
    let config = SmartTabConfig::from_toml(
      r#"
      enable = false
      max-gap = 4
      search-lines = 10
      eager-jump-out = true
      "#,
    )
    .unwrap();
    assert_eq!(
      config,
      SmartTabConfig {
        enable:         false,
        max_gap:        4,
        search_lines:   10,
        eager_jump_out: true,
      }
    );
  }

  #[test]
  fn test_partial_config_keeps_defaults() {
    let config = SmartTabConfig::from_toml("max-gap = 0").unwrap();
    assert!(config.enable);
    assert_eq!(config.max_gap, 0);
    assert_eq!(config.search_lines, MAX_LINES_TO_SEARCH);
  }

  #[test]
  fn test_unknown_keys_are_rejected() {
    assert!(matches!(
      SmartTabConfig::from_toml("enabled = true"),
      Err(ConfigError::Parse(_))
    ));
    assert!(SmartTabConfig::from_toml("max-gap = \"wide\"").is_err());
  }
}
