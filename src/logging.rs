//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Crate targets that receive log output by default.
const CRATE_TARGETS: &[&str] = &["holdings_parser"];

/// Pick the log level from CLI verbosity, falling back to the configured level.
///
/// Mapping:
/// - 0 (none) -> `configured`
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
#[must_use]
pub fn level_for(verbosity: u8, configured: &str) -> &str {
    match verbosity {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a formatting subscriber writing to stderr.
///
/// `RUST_LOG` overrides the computed level if set. Stdout is left for
/// record output.
pub fn init(verbosity: u8, configured: &str) {
    let level = level_for(verbosity, configured);

    let default_filter: String = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0, "warn"), "warn");
        assert_eq!(level_for(0, "error"), "error");
        assert_eq!(level_for(1, "warn"), "info");
        assert_eq!(level_for(2, "warn"), "debug");
        assert_eq!(level_for(7, "warn"), "trace");
    }
}
