//! Temporary user configuration files for testing

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Writes a config file into a fresh temporary directory that is removed
/// when the guard is dropped.
pub struct ConfigFileGuard {
  temp_dir: TempDir,
  path: PathBuf,
}

impl ConfigFileGuard {
  /// Create `config.toml` with the given content
  pub fn new(content: &str) -> Self {
    Self::try_new(content).expect("Failed to create test config file")
  }

  pub fn try_new(content: &str) -> Result<Self> {
    let temp_dir = TempDir::new().context("Failed to create temp directory")?;
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(Self { temp_dir, path })
  }

  /// Get the path to the config file
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Replace the config file's content
  pub fn rewrite(&self, content: &str) -> Result<()> {
    fs::write(&self.path, content).with_context(|| format!("Failed to write {}", self.path.display()))
  }
}
