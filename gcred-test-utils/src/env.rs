//! Environment variable management for testing
//!
//! This module provides utilities for managing environment variables during
//! testing so tests don't leak settings into each other. Tests touching the
//! same variable should still use distinct names where they can, since the
//! process environment is shared between test threads.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use tempfile::TempDir;

/// Overrides (or removes) a single environment variable, restoring its
/// previous value when dropped.
pub struct EnvVarGuard {
  name: String,
  original: Option<OsString>,
}

impl EnvVarGuard {
  /// Set `name` to `value` for the lifetime of the guard.
  pub fn set(name: &str, value: impl AsRef<OsStr>) -> Self {
    let original = env::var_os(name);
    unsafe {
      env::set_var(name, value);
    }
    Self {
      name: name.to_string(),
      original,
    }
  }

  /// Remove `name` for the lifetime of the guard.
  pub fn unset(name: &str) -> Self {
    let original = env::var_os(name);
    unsafe {
      env::remove_var(name);
    }
    Self {
      name: name.to_string(),
      original,
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}

/// A test environment that overrides XDG directories to use a per-test
/// temporary directory
pub struct EnvTestGuard {
  /// The temporary directory that will be used for XDG directories
  pub temp_dir: TempDir,
  config_home: EnvVarGuard,
  data_home: EnvVarGuard,
  cache_home: EnvVarGuard,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// XDG environment variable names
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";
  pub const XDG_CACHE_HOME: &'static str = "XDG_CACHE_HOME";

  /// Create a new test environment with overridden XDG directories
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path().to_path_buf();

    // Create the XDG directories
    std::fs::create_dir_all(temp_path.join("config")).expect("Failed to create config directory");
    std::fs::create_dir_all(temp_path.join("data")).expect("Failed to create data directory");
    std::fs::create_dir_all(temp_path.join("cache")).expect("Failed to create cache directory");

    Self {
      config_home: EnvVarGuard::set(Self::XDG_CONFIG_HOME, temp_path.join("config")),
      data_home: EnvVarGuard::set(Self::XDG_DATA_HOME, temp_path.join("data")),
      cache_home: EnvVarGuard::set(Self::XDG_CACHE_HOME, temp_path.join("cache")),
      temp_dir,
    }
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Get the path to the XDG data directory
  pub fn data_dir(&self) -> PathBuf {
    self.temp_dir.path().join("data")
  }

  /// Get the path to the XDG cache directory
  pub fn cache_dir(&self) -> PathBuf {
    self.temp_dir.path().join("cache")
  }
}
