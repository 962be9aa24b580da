//! # Errors
//!
//! Error kinds surfaced by the credential helper and by individual token
//! sources.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::token_source::TokenSource;

/// Errors returned by [`crate::CredentialHelper`] and its collaborators.
#[derive(Debug, Error)]
pub enum HelperError {
  /// Add or Delete was invoked for a GCR hostname.
  #[error("{operation} is not supported for GCR registry {server_url}; GCR credentials are resolved, never stored")]
  UnsupportedOperation {
    operation: &'static str,
    server_url: String,
  },

  /// The credential store holds nothing for the requested server.
  #[error("credentials not found in native keychain")]
  CredentialsNotFound,

  /// The configured token source list names a source that does not exist.
  #[error("unsupported token source: '{0}'")]
  InvalidTokenSource(String),

  /// Every configured token source failed.
  #[error("no GCR token source produced an access token{}", FailureList(.attempts))]
  NoTokenSource { attempts: Vec<(TokenSource, TokenError)> },

  /// Failure reported by the credential store backend.
  #[error("credential store error: {0}")]
  Store(#[source] anyhow::Error),

  /// Failure loading or saving user configuration.
  #[error("configuration error: {0:#}")]
  Config(#[source] anyhow::Error),
}

impl HelperError {
  /// Returns true for the distinguished "credentials not found" condition.
  pub const fn is_credentials_not_found(&self) -> bool {
    matches!(self, Self::CredentialsNotFound)
  }

  /// Process exit status an outer command dispatcher should report.
  pub const fn exit_code(&self) -> i32 {
    match self {
      Self::UnsupportedOperation { .. } => 2,
      Self::InvalidTokenSource(_) | Self::Config(_) => 3,
      Self::CredentialsNotFound | Self::NoTokenSource { .. } | Self::Store(_) => 1,
    }
  }

  pub(crate) fn unsupported(operation: &'static str, server_url: &str) -> Self {
    Self::UnsupportedOperation {
      operation,
      server_url: server_url.to_string(),
    }
  }
}

/// Renders the per-source failures of an exhausted resolution.
struct FailureList<'a>(&'a [(TokenSource, TokenError)]);

impl fmt::Display for FailureList<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.0.is_empty() {
      return f.write_str(" (no token sources configured)");
    }
    f.write_str(":")?;
    for (source, err) in self.0 {
      write!(f, " [{source}: {err}]")?;
    }
    Ok(())
  }
}

/// Why a single token source could not produce a token.
#[derive(Debug, Error)]
pub enum TokenError {
  #[error("{0} is not set")]
  NotSet(String),

  #[error("token source returned an empty token")]
  Empty,

  #[error("token expired at {0}")]
  Expired(DateTime<Utc>),

  #[error("`{command}` failed: {reason}")]
  Command { command: String, reason: String },

  #[error("`{command}` did not finish within {timeout:?}")]
  Timeout { command: String, timeout: Duration },

  #[error("failed to parse token response: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("credential store lookup failed: {0}")]
  Store(#[source] Box<HelperError>),
}
