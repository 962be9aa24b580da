//! Access tokens cached in the credential store.

use chrono::Utc;
use tracing::trace;

use crate::error::TokenError;
use crate::store::CredStore;

/// Return the GCR token cached in `store`, provided it has not expired.
pub fn cred_store_token(store: &dyn CredStore) -> Result<String, TokenError> {
  trace!("Looking up cached GCR token in the credential store");

  let cached = store
    .get_gcr_auth()
    .map_err(|e| TokenError::Store(Box::new(e)))?
    .ok_or_else(|| TokenError::NotSet("cached GCR access token".to_string()))?;

  if cached.access_token.trim().is_empty() {
    return Err(TokenError::Empty);
  }
  if let Some(expiry) = cached.token_expiry
    && cached.is_expired_at(Utc::now())
  {
    return Err(TokenError::Expired(expiry));
  }

  Ok(cached.access_token)
}
