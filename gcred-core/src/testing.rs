//! Test doubles shared by the unit tests.

use std::sync::Mutex;

use crate::error::TokenError;
use crate::store::CredStore;
use crate::token_source::{TokenProvider, TokenSource};

/// A [`TokenProvider`] with canned answers that records which sources were
/// asked.
pub struct StubTokenProvider {
  env: Option<&'static str>,
  gcloud_sdk: Option<&'static str>,
  store: Option<&'static str>,
  calls: Mutex<Vec<TokenSource>>,
}

impl StubTokenProvider {
  /// `None` makes the corresponding source fail.
  pub const fn new(
    env: Option<&'static str>,
    gcloud_sdk: Option<&'static str>,
    store: Option<&'static str>,
  ) -> Self {
    Self {
      env,
      gcloud_sdk,
      store,
      calls: Mutex::new(Vec::new()),
    }
  }

  /// Sources consulted so far, in call order.
  pub fn calls(&self) -> Vec<TokenSource> {
    self.calls.lock().unwrap().clone()
  }

  fn answer(&self, source: TokenSource, token: Option<&'static str>) -> Result<String, TokenError> {
    self.calls.lock().unwrap().push(source);
    token
      .map(ToString::to_string)
      .ok_or_else(|| TokenError::NotSet(format!("no token here for {source}")))
  }
}

impl TokenProvider for StubTokenProvider {
  fn env_token(&self) -> Result<String, TokenError> {
    self.answer(TokenSource::Env, self.env)
  }

  fn gcloud_sdk_token(&self) -> Result<String, TokenError> {
    self.answer(TokenSource::GcloudSdk, self.gcloud_sdk)
  }

  fn cred_store_token(&self, _store: &dyn CredStore) -> Result<String, TokenError> {
    self.answer(TokenSource::Store, self.store)
  }
}
