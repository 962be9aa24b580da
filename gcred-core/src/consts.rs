//! Core constants shared across gcred components.

use std::time::Duration;

/// Username docker must present alongside a GCR OAuth2 access token.
pub const GCR_OAUTH2_USERNAME: &str = "oauth2accesstoken";

/// Registry domains served by GCR. A host matches when it equals one of these
/// or is a subdomain of one.
pub const GCR_DOMAINS: [&str; 2] = ["gcr.io", "gcr.kubernetes.io"];

/// Environment variable read by the `env` token source.
pub const ENV_ACCESS_TOKEN: &str = "GCRED_ACCESS_TOKEN";

/// Environment variable overriding the location of the user config file.
pub const ENV_CONFIG_PATH: &str = "GCRED_CONFIG";

/// Default executable used by the `gcloud_sdk` token source.
pub const GCLOUD_COMMAND: &str = "gcloud";

/// Upper bound on how long the gcloud subprocess may run.
pub const GCLOUD_TIMEOUT: Duration = Duration::from_secs(10);

/// Tokens expiring within this window are treated as already expired.
pub const TOKEN_EXPIRY_SKEW_SECS: i64 = 30;

/// File name of the user configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
