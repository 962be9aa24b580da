//! # Access Token Resolution
//!
//! Walks the user's ordered token sources and returns the first access token
//! any of them produces.

use tracing::{debug, info, warn};

use crate::config::UserConfig;
use crate::error::{HelperError, TokenError};
use crate::store::CredStore;
use crate::token_source::{TokenProvider, TokenSource};

/// Resolves a GCR access token from the configured token sources.
pub struct AccessTokenResolver<'a> {
  config: &'a dyn UserConfig,
  provider: &'a dyn TokenProvider,
  store: &'a dyn CredStore,
}

impl<'a> AccessTokenResolver<'a> {
  pub fn new(config: &'a dyn UserConfig, provider: &'a dyn TokenProvider, store: &'a dyn CredStore) -> Self {
    Self {
      config,
      provider,
      store,
    }
  }

  /// Return the token from the first configured source that yields one.
  ///
  /// The whole source list is validated before any source is consulted, so
  /// an unknown name fails the resolution even if a valid source listed
  /// before it would have succeeded. Sources not listed are never consulted.
  ///
  /// # Errors
  ///
  /// * [`HelperError::InvalidTokenSource`] for an unrecognised source name.
  /// * [`HelperError::NoTokenSource`] when every listed source fails.
  pub fn resolve(&self) -> Result<String, HelperError> {
    let sources = TokenSource::parse_list(self.config.token_sources().as_slice()).inspect_err(|e| {
      warn!("Refusing to resolve a GCR token: {e}");
    })?;

    let mut attempts = Vec::with_capacity(sources.len());
    for source in sources {
      match self.provider.fetch(source, self.store) {
        Ok(token) if !token.trim().is_empty() => {
          info!("Resolved GCR access token from the {source} token source");
          return Ok(token);
        }
        Ok(_) => {
          debug!("Token source {source} returned an empty token");
          attempts.push((source, TokenError::Empty));
        }
        Err(e) => {
          debug!("Token source {source} failed: {e}");
          attempts.push((source, e));
        }
      }
    }

    Err(HelperError::NoTokenSource { attempts })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::MockUserConfig;
  use crate::store::MockCredStore;
  use crate::testing::StubTokenProvider;
  use crate::token_source::DEFAULT_TOKEN_SOURCES;

  fn config_with_sources(sources: &[&str]) -> MockUserConfig {
    let sources: Vec<String> = sources.iter().map(ToString::to_string).collect();
    let mut config = MockUserConfig::new();
    config.expect_token_sources().times(1).return_once(move || sources);
    config
  }

  fn default_config() -> MockUserConfig {
    let names: Vec<&str> = DEFAULT_TOKEN_SOURCES.iter().map(TokenSource::as_str).collect();
    config_with_sources(&names)
  }

  #[test]
  fn test_env_source_preferred_by_default() {
    let config = default_config();
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(
      Some("application default creds!"),
      Some("gcloud sdk creds!"),
      Some("private creds!"),
    );

    let token = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap();

    assert_eq!(token, "application default creds!");
    assert_eq!(provider.calls(), vec![TokenSource::Env]);
  }

  #[test]
  fn test_falls_through_to_gcloud_sdk() {
    let config = default_config();
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(None, Some("gcloud sdk creds!"), Some("private creds!"));

    let token = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap();

    assert_eq!(token, "gcloud sdk creds!");
    assert_eq!(provider.calls(), vec![TokenSource::Env, TokenSource::GcloudSdk]);
  }

  #[test]
  fn test_falls_through_to_store() {
    let config = default_config();
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(None, None, Some("private creds!"));

    let token = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap();

    assert_eq!(token, "private creds!");
  }

  #[test]
  fn test_no_source_succeeds() {
    let config = default_config();
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(None, None, None);

    let err = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap_err();

    match err {
      HelperError::NoTokenSource { attempts } => {
        let tried: Vec<TokenSource> = attempts.iter().map(|(source, _)| *source).collect();
        assert_eq!(tried, DEFAULT_TOKEN_SOURCES.to_vec());
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_custom_order_is_honoured() {
    let config = config_with_sources(&["store", "gcloud_sdk", "env"]);
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(
      Some("environment creds!"),
      Some("gcloud sdk creds!"),
      Some("private creds!"),
    );

    let token = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap();

    assert_eq!(token, "private creds!");
    assert_eq!(provider.calls(), vec![TokenSource::Store]);
  }

  #[test]
  fn test_unlisted_sources_are_never_consulted() {
    let config = config_with_sources(&["gcloud_sdk"]);
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(Some("environment creds!"), None, Some("private creds!"));

    let err = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap_err();

    assert!(matches!(err, HelperError::NoTokenSource { .. }));
    assert_eq!(provider.calls(), vec![TokenSource::GcloudSdk]);
  }

  #[test]
  fn test_invalid_source_fails_closed() {
    let config = config_with_sources(&["invalid"]);
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(
      Some("environment creds!"),
      Some("gcloud sdk creds!"),
      Some("private creds!"),
    );

    let err = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap_err();

    assert!(matches!(err, HelperError::InvalidTokenSource(ref name) if name == "invalid"));
    assert!(provider.calls().is_empty());
  }

  #[test]
  fn test_invalid_source_after_valid_one_still_fails() {
    let config = config_with_sources(&["env", "bogus"]);
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(Some("environment creds!"), None, None);

    let err = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap_err();

    assert!(matches!(err, HelperError::InvalidTokenSource(_)));
    assert!(provider.calls().is_empty());
  }

  #[test]
  fn test_empty_source_list_is_exhaustion() {
    let config = config_with_sources(&[]);
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(Some("environment creds!"), None, None);

    let err = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap_err();

    assert!(matches!(err, HelperError::NoTokenSource { ref attempts } if attempts.is_empty()));
  }

  #[test]
  fn test_blank_token_counts_as_failure() {
    let config = default_config();
    let store = MockCredStore::new();
    let provider = StubTokenProvider::new(Some("  "), Some("gcloud sdk creds!"), None);

    let token = AccessTokenResolver::new(&config, &provider, &store).resolve().unwrap();

    assert_eq!(token, "gcloud sdk creds!");
  }
}
