//! # Configuration Management
//!
//! User preferences consulted by the helper: the ordered list of token
//! sources and whether a lookup miss should fall back to a GCR token. The
//! settings live in a TOML file under the XDG config directory.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{CONFIG_FILE_NAME, ENV_CONFIG_PATH};
use crate::error::HelperError;
use crate::token_source::{DEFAULT_TOKEN_SOURCES, TokenSource};

/// Read-only view of the user's helper configuration.
#[cfg_attr(test, mockall::automock)]
pub trait UserConfig: Send + Sync {
  /// Configured token source names, most preferred first.
  fn token_sources(&self) -> Vec<String>;

  /// Whether a credential store miss should be answered with a GCR token.
  fn default_to_gcr_access_token(&self) -> bool;
}

/// User configuration as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileUserConfig {
  pub token_sources: Vec<String>,
  pub default_to_gcr_access_token: bool,
}

impl Default for FileUserConfig {
  fn default() -> Self {
    Self {
      token_sources: DEFAULT_TOKEN_SOURCES.iter().map(ToString::to_string).collect(),
      default_to_gcr_access_token: false,
    }
  }
}

impl FileUserConfig {
  /// Load the configuration from its default location.
  pub fn load() -> Result<Self, HelperError> {
    let dirs = ConfigDirs::new().map_err(HelperError::Config)?;
    Self::load_from(&dirs.config_path())
  }

  /// Load the configuration from `path`, falling back to defaults when the
  /// file does not exist.
  ///
  /// Unknown token source names are rejected here so a bad file is reported
  /// as soon as it is read.
  pub fn load_from(path: &Path) -> Result<Self, HelperError> {
    if !path.exists() {
      debug!("No config file at {}, using defaults", path.display());
      return Ok(Self::default());
    }

    let content = fs::read_to_string(path)
      .with_context(|| format!("Failed to read config from {}", path.display()))
      .map_err(HelperError::Config)?;

    let config: Self = toml::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", path.display()))
      .map_err(HelperError::Config)?;

    config.sources()?;
    Ok(config)
  }

  /// Write the configuration to `path`, creating parent directories.
  pub fn save_to(&self, path: &Path) -> Result<(), HelperError> {
    self.sources()?;

    let write = || -> Result<()> {
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
      }
      let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
      fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))
    };

    write().map_err(HelperError::Config)
  }

  /// The configured sources as typed values.
  pub fn sources(&self) -> Result<Vec<TokenSource>, HelperError> {
    TokenSource::parse_list(self.token_sources.as_slice())
  }
}

impl UserConfig for FileUserConfig {
  fn token_sources(&self) -> Vec<String> {
    self.token_sources.clone()
  }

  fn default_to_gcr_access_token(&self) -> bool {
    self.default_to_gcr_access_token
  }
}

/// Locates gcred's configuration directory.
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "gcred", "gcred").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Path of the user config file, honouring `$GCRED_CONFIG`.
  pub fn config_path(&self) -> PathBuf {
    self.config_path_with_override(std::env::var_os(ENV_CONFIG_PATH))
  }

  fn config_path_with_override(&self, override_path: Option<OsString>) -> PathBuf {
    match override_path {
      Some(path) if !path.is_empty() => PathBuf::from(path),
      _ => self.config_dir.join(CONFIG_FILE_NAME),
    }
  }
}
