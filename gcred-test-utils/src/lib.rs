//! Test utilities shared across the gcred workspace
//!
//! This crate provides common testing infrastructure including:
//! - XDG directory mocking ([`EnvTestGuard`])
//! - Single environment variable overrides ([`EnvVarGuard`])
//! - Temporary user config files ([`ConfigFileGuard`])
//! - Fake Cloud SDK executables ([`FakeGcloudGuard`], unix only)
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod env;
#[cfg(unix)]
pub mod gcloud;

// Re-export commonly used items
pub use config::ConfigFileGuard;
pub use env::{EnvTestGuard, EnvVarGuard};
#[cfg(unix)]
pub use gcloud::FakeGcloudGuard;
