//! # gcred Core Library
//!
//! Credential resolution for a GCR-aware docker credential helper. Requests
//! for GCR hosts are answered with a short-lived OAuth2 access token taken
//! from the first configured token source that has one; every other host is
//! delegated to a generic credential store.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gcred_core::{CredStore, CredentialHelper, FileUserConfig};
//!
//! # fn run(store: Arc<dyn CredStore>) -> Result<(), gcred_core::HelperError> {
//! let config = FileUserConfig::load()?;
//! let helper = CredentialHelper::new(store, Arc::new(config));
//! let (username, secret) = helper.get("https://gcr.io")?;
//! assert_eq!(username, "oauth2accesstoken");
//! # let _ = secret;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod consts;
pub mod error;
pub mod helper;
pub mod hostname;
pub mod logging;
pub mod resolver;
pub mod store;
pub mod token_source;

#[cfg(test)]
mod testing;

// Re-export main types for embedders
pub use config::{ConfigDirs, FileUserConfig, UserConfig};
pub use error::{HelperError, TokenError};
pub use helper::CredentialHelper;
pub use hostname::is_gcr_hostname;
pub use resolver::AccessTokenResolver;
pub use store::{AccessToken, CredStore, Credential};
pub use token_source::{DEFAULT_TOKEN_SOURCES, SystemTokenProvider, TokenProvider, TokenSource};
