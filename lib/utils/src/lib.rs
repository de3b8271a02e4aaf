//! Helpers shared by the tests and any host binary of the workspace

use std::sync::Once;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

static INIT: Once = Once::new();

/// Install a compact logger for the `tracing` output of the engine
///
/// Nothing is printed unless the `RUST_LOG` environment variable asks for it, e.g.
/// `RUST_LOG=game=debug`. Calling this more than once is harmless, and if another subscriber was
/// already installed, that one is kept.
pub fn setup_logger() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
        let _ = tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_thread_names(false)
            .with_env_filter(env_filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_twice() {
        setup_logger();
        setup_logger();
        assert!(INIT.is_completed());
    }
}
