//! # Configuration Module
//!
//! This module provides configuration support for pycopyright, allowing users
//! to set the notice text, the extension allow-list and ignore patterns once
//! per project instead of on every command line.
//!
//! Configuration can be specified in a `.pycopyright.toml` file or via the
//! `PYCOPYRIGHT_CONFIG` environment variable.
//!
//! ```toml
//! notice = "Copyright (C) {{year}} ACME Corp. All Rights Reserved."
//! extensions = ["py", "pyi"]
//! ignore = ["*_pb2.py", "build/*"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::notice::NoticeText;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".pycopyright.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "PYCOPYRIGHT_CONFIG";

/// Main configuration struct for pycopyright.
///
/// Every key is optional; command-line flags take precedence over anything
/// set here.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Notice text, possibly containing a `{{year}}` placeholder.
  #[serde(default)]
  pub notice: Option<String>,

  /// Extensions to process, without the leading dot (e.g. "py").
  #[serde(default)]
  pub extensions: Option<Vec<String>>,

  /// Glob patterns for files to skip.
  #[serde(default)]
  pub ignore: Vec<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value in the config file is invalid.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed, or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    Self::parse(path, &content)
  }

  fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;
    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - The notice, if set, is a single non-empty line
  /// - Extensions are non-empty and don't include the leading dot
  /// - Ignore patterns are valid globs
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref notice) = self.notice {
      NoticeText::new(notice).map_err(|e| ConfigError::InvalidValue {
        key: "notice".to_string(),
        message: e.to_string(),
      })?;
    }

    for ext in self.extensions.iter().flatten() {
      if ext.is_empty() {
        return Err(ConfigError::InvalidValue {
          key: "extensions".to_string(),
          message: "extension cannot be empty".to_string(),
        });
      }
      if ext.starts_with('.') {
        return Err(ConfigError::InvalidValue {
          key: "extensions".to_string(),
          message: format!("extension '{ext}' should not include leading dot"),
        });
      }
    }

    for pattern in &self.ignore {
      if let Err(e) = glob::Pattern::new(pattern) {
        return Err(ConfigError::InvalidValue {
          key: "ignore".to_string(),
          message: format!("invalid glob pattern '{pattern}': {e}"),
        });
      }
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `PYCOPYRIGHT_CONFIG` environment variable
/// 3. `.pycopyright.toml` in the scan root
///
/// An explicit path is returned even if it does not exist, so that loading it
/// reports the problem instead of silently falling back to defaults.
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using project config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `root` - The scan root directory
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if no config file applies.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn parse(content: &str) -> Result<Config, ConfigError> {
    Config::parse(Path::new("test.toml"), content)
  }

  #[test]
  fn test_parse_valid_config() {
    let config = parse(concat!(
      "notice = \"Copyright (C) {{year}} ACME. All Rights Reserved.\"\n",
      "extensions = [\"py\", \"pyi\"]\n",
      "ignore = [\"*_pb2.py\"]\n",
    ))
    .unwrap();

    assert_eq!(
      config.notice.as_deref(),
      Some("Copyright (C) {{year}} ACME. All Rights Reserved.")
    );
    assert_eq!(config.extensions, Some(vec!["py".to_string(), "pyi".to_string()]));
    assert_eq!(config.ignore, vec!["*_pb2.py".to_string()]);
  }

  #[test]
  fn test_parse_empty_config() {
    assert_eq!(parse("").unwrap(), Config::default());
  }

  #[test]
  fn test_reject_unknown_key() {
    assert!(matches!(parse("notcie = \"x\"\n"), Err(ConfigError::ParseError { .. })));
  }

  #[test]
  fn test_reject_empty_notice() {
    let err = parse("notice = \"  \"\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "notice"));
  }

  #[test]
  fn test_reject_multiline_notice() {
    let err = parse("notice = \"line one\\nline two\"\n").unwrap_err();
    assert!(err.to_string().contains("single line"));
  }

  #[test]
  fn test_reject_extension_with_dot() {
    let err = parse("extensions = [\".py\"]\n").unwrap_err();
    assert!(err.to_string().contains("leading dot"));
  }

  #[test]
  fn test_reject_bad_glob() {
    let err = parse("ignore = [\"[\"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "ignore"));
  }

  #[test]
  fn test_discover_in_root() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").unwrap();

    let explicit = temp_dir.path().join("custom.toml");
    assert_eq!(discover_config_path(Some(&explicit), temp_dir.path()), Some(explicit));

    // Only meaningful when the environment doesn't point elsewhere.
    if std::env::var(CONFIG_ENV_VAR).is_err() {
      assert_eq!(discover_config_path(None, temp_dir.path()), Some(config_path));
    }
  }

  #[test]
  fn test_load_config_respects_no_config() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "notice = \"x\"\n").unwrap();

    assert!(load_config(None, temp_dir.path(), true).unwrap().is_none());
  }

  #[test]
  fn test_load_config_missing_explicit_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.toml");

    let err = load_config(Some(&missing), temp_dir.path(), false).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read config file"));
  }

  #[test]
  fn test_load_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    std::fs::write(&path, "extensions = [\"py\", \"pyw\"]\n").unwrap();

    let config = load_config(Some(&path), temp_dir.path(), false).unwrap().unwrap();
    assert_eq!(config.extensions, Some(vec!["py".to_string(), "pyw".to_string()]));
    assert!(config.notice.is_none());
  }
}
