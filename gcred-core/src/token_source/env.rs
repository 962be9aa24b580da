//! Access tokens exported through the process environment.

use tracing::trace;

use crate::consts::ENV_ACCESS_TOKEN;
use crate::error::TokenError;

/// Reads an access token from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvTokenSource {
  var: String,
}

impl Default for EnvTokenSource {
  fn default() -> Self {
    Self::new(ENV_ACCESS_TOKEN)
  }
}

impl EnvTokenSource {
  pub fn new(var: impl Into<String>) -> Self {
    Self { var: var.into() }
  }

  /// Name of the variable this source reads.
  pub fn var(&self) -> &str {
    &self.var
  }

  pub fn token(&self) -> Result<String, TokenError> {
    trace!("Reading access token from ${}", self.var);

    match std::env::var(&self.var) {
      Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
      _ => Err(TokenError::NotSet(self.var.clone())),
    }
  }
}
