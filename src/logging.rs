//! Log bootstrap for the binary.
//!
//! Initialization happens once per process. Repeating it with the same
//! verbosity is a no-op; a different verbosity is rejected.

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt};

static LOG_VERBOSITY: OnceLock<u8> = OnceLock::new();

/// Installs a stderr `tracing` subscriber.
///
/// With no `-v` flags the filter comes from `RUST_LOG`, falling back to `warn`.
pub fn init_logging(verbosity: u8) -> Result<(), String> {
    if let Some(current) = LOG_VERBOSITY.get() {
        if *current == verbosity {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized at verbosity {}; refusing to switch to {}",
            current, verbosity
        ));
    }

    fmt()
        .with_env_filter(filter_for(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("failed to install log subscriber: {e}"))?;

    let _ = LOG_VERBOSITY.set(verbosity);
    Ok(())
}

fn filter_for(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_for_same_verbosity() {
        assert!(init_logging(2).is_ok());
        assert!(init_logging(2).is_ok());
        assert!(init_logging(3).is_err());
    }
}
