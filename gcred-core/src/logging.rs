//! Tracing setup for binaries embedding the helper.

use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Map a `-v` count to the most verbose level that should be shown.
pub const fn level_for_verbosity(verbose: u8) -> tracing::Level {
  match verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  }
}

/// Install a global subscriber writing to stderr.
///
/// Stdout belongs to the credential helper protocol, so nothing is logged
/// there. `RUST_LOG` directives are honoured on top of the verbosity level.
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: u8) -> Result<(), tracing_subscriber::util::TryInitError> {
  let level = level_for_verbosity(verbose);

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .try_init()?;

  debug!("Tracing initialized with level: {}", level);
  Ok(())
}
