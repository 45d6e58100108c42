//! Logging setup.
//!
//! Structured console logging on stderr, so orthophoto progress never
//! interleaves with the CLI's stdout output. Configurable via the
//! `RUST_LOG` environment variable.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The default level is `info`, or `debug` when `verbose` is set. An
/// explicit `RUST_LOG` always wins over both.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so a
    // single test covers both outcomes.
    #[test]
    fn test_second_init_fails() {
        assert!(init(false).is_ok());
        assert!(init(true).is_err());
    }
}
