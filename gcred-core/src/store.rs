//! # Credential Store
//!
//! The narrow interface the helper uses to reach the generic credential
//! backend, plus the value types that cross it. The backend itself lives
//! outside this crate.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::TOKEN_EXPIRY_SKEW_SECS;
use crate::error::HelperError;

/// Credentials for a single registry server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credential {
  #[serde(rename = "ServerURL")]
  pub server_url: String,
  pub username: String,
  pub secret: String,
}

impl Credential {
  pub fn new(server_url: impl Into<String>, username: impl Into<String>, secret: impl Into<String>) -> Self {
    Self {
      server_url: server_url.into(),
      username: username.into(),
      secret: secret.into(),
    }
  }
}

// Secrets must never reach logs, so Debug is written by hand.
impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credential")
      .field("server_url", &self.server_url)
      .field("username", &self.username)
      .field("secret", &"<redacted>")
      .finish()
  }
}

/// A GCR access token previously cached in the credential store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
  pub access_token: String,
  #[serde(default)]
  pub token_expiry: Option<DateTime<Utc>>,
}

impl AccessToken {
  /// Whether the token is expired (or about to be) at `now`.
  ///
  /// Tokens without a recorded expiry are assumed valid.
  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self
      .token_expiry
      .is_some_and(|expiry| expiry <= now + Duration::seconds(TOKEN_EXPIRY_SKEW_SECS))
  }
}

impl fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AccessToken")
      .field("access_token", &"<redacted>")
      .field("token_expiry", &self.token_expiry)
      .finish()
  }
}

/// Storage for credentials of non-GCR registries.
///
/// Implementations report a missing entry as
/// [`HelperError::CredentialsNotFound`] and any other failure as
/// [`HelperError::Store`]. They must tolerate concurrent reads; the helper
/// adds no locking of its own.
#[cfg_attr(test, mockall::automock)]
pub trait CredStore: Send + Sync {
  /// Look up the credentials stored for `server_url`.
  fn get_other_creds(&self, server_url: &str) -> Result<Credential, HelperError>;

  /// Store `credential`, replacing any existing entry for its server.
  fn set_other_creds(&self, credential: &Credential) -> Result<(), HelperError>;

  /// Remove the credentials stored for `server_url`.
  fn delete_other_creds(&self, server_url: &str) -> Result<(), HelperError>;

  /// Fetch the GCR access token cached by a previous login, if any.
  fn get_gcr_auth(&self) -> Result<Option<AccessToken>, HelperError>;
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn test_credential_debug_redacts_secret() {
    let cred = Credential::new("https://docker.io", "someone", "hunter2");
    let rendered = format!("{cred:?}");

    assert!(rendered.contains("someone"));
    assert!(rendered.contains("https://docker.io"));
    assert!(!rendered.contains("hunter2"));
  }

  #[test]
  fn test_credential_uses_docker_field_names() {
    let cred = Credential::new("https://docker.io", "someone", "hunter2");
    let json = serde_json::to_value(&cred).unwrap();

    assert_eq!(json["ServerURL"], "https://docker.io");
    assert_eq!(json["Username"], "someone");
    assert_eq!(json["Secret"], "hunter2");
  }

  #[test]
  fn test_access_token_expiry() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let token = |expiry| AccessToken {
      access_token: "ya29.token".to_string(),
      token_expiry: expiry,
    };

    assert!(!token(None).is_expired_at(now));
    assert!(!token(Some(now + Duration::hours(1))).is_expired_at(now));
    assert!(token(Some(now - Duration::hours(1))).is_expired_at(now));
    // Inside the skew window counts as expired.
    assert!(token(Some(now + Duration::seconds(5))).is_expired_at(now));
  }

  #[test]
  fn test_access_token_debug_redacts_token() {
    let token = AccessToken {
      access_token: "ya29.secret".to_string(),
      token_expiry: None,
    };
    assert!(!format!("{token:?}").contains("ya29.secret"));
  }
}
