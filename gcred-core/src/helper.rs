//! # Credential Helper
//!
//! The Add/Get/Delete facade a docker credential helper exposes. GCR hosts
//! are answered with freshly resolved access tokens and are read-only; every
//! other host is passed through to the credential store.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::UserConfig;
use crate::consts::GCR_OAUTH2_USERNAME;
use crate::error::HelperError;
use crate::hostname::is_gcr_hostname;
use crate::resolver::AccessTokenResolver;
use crate::store::{CredStore, Credential};
use crate::token_source::{SystemTokenProvider, TokenProvider};

/// Routes credential requests between GCR token resolution and the
/// credential store.
///
/// Holds no mutable state, so a single helper can serve concurrent calls as
/// long as the store and config it wraps can.
pub struct CredentialHelper {
  store: Arc<dyn CredStore>,
  config: Arc<dyn UserConfig>,
  tokens: Box<dyn TokenProvider>,
}

impl CredentialHelper {
  /// Create a helper that fetches tokens from the real environment, Cloud
  /// SDK and credential store.
  pub fn new(store: Arc<dyn CredStore>, config: Arc<dyn UserConfig>) -> Self {
    Self::with_token_provider(store, config, Box::new(SystemTokenProvider::default()))
  }

  pub const fn with_token_provider(
    store: Arc<dyn CredStore>,
    config: Arc<dyn UserConfig>,
    tokens: Box<dyn TokenProvider>,
  ) -> Self {
    Self { store, config, tokens }
  }

  /// Store credentials for a non-GCR registry.
  ///
  /// GCR credentials are always resolved on demand, so storing them is
  /// rejected with [`HelperError::UnsupportedOperation`].
  pub fn add(&self, credential: &Credential) -> Result<(), HelperError> {
    if is_gcr_hostname(&credential.server_url) {
      return Err(HelperError::unsupported("add", &credential.server_url));
    }

    debug!(server_url = %credential.server_url, "Storing credentials");
    self.store.set_other_creds(credential)
  }

  /// Return `(username, secret)` for `server_url`.
  ///
  /// GCR hosts always get `oauth2accesstoken` and a resolved access token.
  /// Other hosts are looked up in the credential store; on a miss, and only
  /// if the user opted in, the GCR token is returned instead.
  pub fn get(&self, server_url: &str) -> Result<(String, String), HelperError> {
    if is_gcr_hostname(server_url) {
      debug!(server_url, "Resolving GCR access token");
      return self.gcr_credentials();
    }

    match self.store.get_other_creds(server_url) {
      Ok(credential) => Ok((credential.username, credential.secret)),
      Err(e) if e.is_credentials_not_found() && self.config.default_to_gcr_access_token() => {
        info!(server_url, "No stored credentials, falling back to the GCR access token");
        self.gcr_credentials()
      }
      Err(e) => Err(e),
    }
  }

  /// Remove stored credentials for a non-GCR registry.
  pub fn delete(&self, server_url: &str) -> Result<(), HelperError> {
    if is_gcr_hostname(server_url) {
      return Err(HelperError::unsupported("delete", server_url));
    }

    debug!(server_url, "Deleting credentials");
    self.store.delete_other_creds(server_url)
  }

  /// Resolve the current GCR access token from the configured sources.
  pub fn gcr_access_token(&self) -> Result<String, HelperError> {
    AccessTokenResolver::new(self.config.as_ref(), self.tokens.as_ref(), self.store.as_ref()).resolve()
  }

  fn gcr_credentials(&self) -> Result<(String, String), HelperError> {
    let token = self.gcr_access_token()?;
    Ok((GCR_OAUTH2_USERNAME.to_string(), token))
  }
}
