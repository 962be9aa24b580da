//! # Token Sources
//!
//! The fixed set of places a GCR access token can come from, and the
//! capability trait that fetches from each of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HelperError, TokenError};
use crate::store::CredStore;

pub mod cached;
pub mod env;
pub mod gcloud;

pub use env::EnvTokenSource;
pub use gcloud::GcloudTokenSource;

/// A named GCR token source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
  /// Token exported through the process environment.
  Env,
  /// Token cached by a locally installed Cloud SDK.
  GcloudSdk,
  /// Token cached in the credential store by a previous login.
  Store,
}

/// Preference order used when the user has not configured one.
pub const DEFAULT_TOKEN_SOURCES: [TokenSource; 3] = [TokenSource::Env, TokenSource::GcloudSdk, TokenSource::Store];

impl TokenSource {
  /// The configuration name of this source.
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Env => "env",
      Self::GcloudSdk => "gcloud_sdk",
      Self::Store => "store",
    }
  }

  /// Parse an ordered list of configured source names.
  ///
  /// Fails on the first name that is not a known source; nothing is skipped.
  pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>, HelperError> {
    names.iter().map(|name| name.as_ref().parse()).collect()
  }
}

impl fmt::Display for TokenSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for TokenSource {
  type Err = HelperError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "env" => Ok(Self::Env),
      "gcloud_sdk" => Ok(Self::GcloudSdk),
      "store" => Ok(Self::Store),
      other => Err(HelperError::InvalidTokenSource(other.to_string())),
    }
  }
}

/// Fetches GCR access tokens from each [`TokenSource`].
///
/// Each method either yields a token or explains why it could not; a failure
/// only disqualifies that source for the current resolution.
pub trait TokenProvider: Send + Sync {
  fn env_token(&self) -> Result<String, TokenError>;

  fn gcloud_sdk_token(&self) -> Result<String, TokenError>;

  fn cred_store_token(&self, store: &dyn CredStore) -> Result<String, TokenError>;

  /// Fetch a token from `source`.
  fn fetch(&self, source: TokenSource, store: &dyn CredStore) -> Result<String, TokenError> {
    match source {
      TokenSource::Env => self.env_token(),
      TokenSource::GcloudSdk => self.gcloud_sdk_token(),
      TokenSource::Store => self.cred_store_token(store),
    }
  }
}

/// The production [`TokenProvider`], backed by the real environment, the
/// Cloud SDK and the credential store.
#[derive(Debug, Clone, Default)]
pub struct SystemTokenProvider {
  pub env: EnvTokenSource,
  pub gcloud: GcloudTokenSource,
}

impl TokenProvider for SystemTokenProvider {
  fn env_token(&self) -> Result<String, TokenError> {
    self.env.token()
  }

  fn gcloud_sdk_token(&self) -> Result<String, TokenError> {
    self.gcloud.token()
  }

  fn cred_store_token(&self, store: &dyn CredStore) -> Result<String, TokenError> {
    cached::cred_store_token(store)
  }
}
