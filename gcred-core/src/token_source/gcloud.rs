//! Access tokens cached by a locally installed Cloud SDK.
//!
//! The SDK is queried through `gcloud config config-helper --format=json`,
//! which prints the active account's current access token and its expiry
//! without prompting.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::consts::{GCLOUD_COMMAND, GCLOUD_TIMEOUT};
use crate::error::TokenError;
use crate::store::AccessToken;

const CONFIG_HELPER_ARGS: [&str; 3] = ["config", "config-helper", "--format=json"];
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Subset of the config-helper output we care about.
#[derive(Debug, Deserialize)]
struct ConfigHelperOutput {
  credential: AccessToken,
}

/// Queries the Cloud SDK for its cached access token.
#[derive(Debug, Clone)]
pub struct GcloudTokenSource {
  command: PathBuf,
  timeout: Duration,
}

impl Default for GcloudTokenSource {
  fn default() -> Self {
    Self::new(GCLOUD_COMMAND)
  }
}

impl GcloudTokenSource {
  pub fn new(command: impl Into<PathBuf>) -> Self {
    Self {
      command: command.into(),
      timeout: GCLOUD_TIMEOUT,
    }
  }

  pub const fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn token(&self) -> Result<String, TokenError> {
    let stdout = self.run_config_helper()?;
    let output: ConfigHelperOutput = serde_json::from_slice(&stdout)?;
    let credential = output.credential;

    if credential.access_token.trim().is_empty() {
      return Err(TokenError::Empty);
    }
    if let Some(expiry) = credential.token_expiry
      && credential.is_expired_at(Utc::now())
    {
      return Err(TokenError::Expired(expiry));
    }

    debug!("Obtained access token from {}", self.command_display());
    Ok(credential.access_token)
  }

  /// Run the config helper and return its stdout, killing it if it overruns
  /// the timeout.
  fn run_config_helper(&self) -> Result<Vec<u8>, TokenError> {
    trace!("Running {} {}", self.command_display(), CONFIG_HELPER_ARGS.join(" "));

    let mut child = Command::new(&self.command)
      .args(CONFIG_HELPER_ARGS)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(|e| self.command_error(e.to_string()))?;

    // Drain the pipes on their own threads so a chatty child cannot block on
    // a full pipe while we wait for it.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let deadline = Instant::now() + self.timeout;
    let status = loop {
      match child.try_wait() {
        Ok(Some(status)) => break status,
        Ok(None) if Instant::now() >= deadline => {
          let _ = child.kill();
          let _ = child.wait();
          return Err(self.timeout_error());
        }
        Ok(None) => thread::sleep(POLL_INTERVAL),
        Err(e) => return Err(self.command_error(e.to_string())),
      }
    };

    // Processes the child left behind may still hold the pipes open, so the
    // output is collected under the same deadline.
    let stdout = self.collect(stdout, deadline)?;
    let stderr = self.collect(stderr, deadline)?;

    if !status.success() {
      let detail = String::from_utf8_lossy(&stderr).trim().to_string();
      let reason = if detail.is_empty() {
        format!("exited with {status}")
      } else {
        format!("exited with {status}: {detail}")
      };
      return Err(self.command_error(reason));
    }

    Ok(stdout)
  }

  fn collect(&self, output: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Result<Vec<u8>, TokenError> {
    let Some(output) = output else {
      return Ok(Vec::new());
    };
    match output.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
      Ok(buf) => Ok(buf),
      Err(RecvTimeoutError::Timeout) => {
        debug!("{} exited but its output pipe stayed open", self.command_display());
        Err(self.timeout_error())
      }
      Err(RecvTimeoutError::Disconnected) => Ok(Vec::new()),
    }
  }

  fn command_display(&self) -> String {
    self.command.display().to_string()
  }

  fn timeout_error(&self) -> TokenError {
    TokenError::Timeout {
      command: self.command_display(),
      timeout: self.timeout,
    }
  }

  fn command_error(&self, reason: String) -> TokenError {
    TokenError::Command {
      command: self.command_display(),
      reason,
    }
  }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> Receiver<Vec<u8>> {
  let (tx, rx) = mpsc::channel();
  thread::spawn(move || {
    let mut buf = Vec::new();
    let _ = reader.read_to_end(&mut buf);
    let _ = tx.send(buf);
  });
  rx
}
