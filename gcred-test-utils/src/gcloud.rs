//! Fake Cloud SDK executables for testing
//!
//! Writes a small shell script standing in for `gcloud`, so SDK-backed token
//! sources can be exercised without a real installation.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard owning a temporary executable named `gcloud`.
pub struct FakeGcloudGuard {
  temp_dir: TempDir,
  path: PathBuf,
}

impl FakeGcloudGuard {
  /// Create a fake `gcloud` that runs `body` under `/bin/sh`.
  pub fn with_script(body: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("gcloud");

    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write fake gcloud");
    let mut perms = fs::metadata(&path).expect("Failed to stat fake gcloud").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to make fake gcloud executable");

    Self { temp_dir, path }
  }

  /// Create a fake `gcloud` that prints `stdout` and exits successfully.
  pub fn printing(stdout: &str) -> Self {
    Self::with_script(&format!("cat <<'GCRED_EOF'\n{stdout}\nGCRED_EOF"))
  }

  /// Get the path to the fake executable
  pub fn path(&self) -> &Path {
    &self.path
  }
}
