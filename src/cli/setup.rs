//! Setup and initialization functions for CLI
//!
//! Thread pool configuration and logging setup. Both run once, before any
//! analysis starts.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rayon thread stack size (8MB for deeply nested syntax trees)
const RAYON_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new().stack_size(RAYON_STACK_SIZE);

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        // Already configured, e.g. by a test harness
        tracing::debug!("Thread pool already configured: {}", e);
    }
}

/// Default filter directive for a `-v` count
pub fn verbosity_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `-v`.
/// Logs go to stderr so stdout stays clean for reports.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_level(verbosity)));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    // A second initialization (tests) is harmless
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

/// Decide whether output should be colored
pub fn configure_color(plain: bool, use_color: Option<bool>) {
    let enabled = !plain && use_color.unwrap_or_else(|| std::io::stdout().is_terminal());
    colored::control::set_override(enabled);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_level(0), "warn");
        assert_eq!(verbosity_level(1), "info");
        assert_eq!(verbosity_level(2), "debug");
        assert_eq!(verbosity_level(9), "trace");
    }
}
