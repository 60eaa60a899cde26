//! Diagnostic logging setup.
//!
//! Library code logs through `tracing`. Binaries call [`init_logging`] once
//! to print those events on stderr, keeping stdout for progress lines.
//! `RUST_LOG` overrides the verbosity flag when set.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count when `RUST_LOG` is unset.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr `fmt` subscriber.
///
/// Returns `false` if a global subscriber was already installed, which is
/// harmless (tests and embedding applications may have set their own).
pub fn init_logging(verbosity: u8) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(9), "trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(0);
        assert!(!init_logging(1));
    }
}
