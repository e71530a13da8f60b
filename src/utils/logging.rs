//! Logging initialisation built on tracing
//!
//! The engine emits structured events through `tracing`; hosts that embed
//! it can install their own subscriber instead of calling
//! [`init_logging`].

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Install the global tracing subscriber
///
/// Idempotent: repeated calls after the first are no-ops, so library
/// consumers and test binaries can both call it safely. `RUST_LOG` takes
/// precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        if config.json {
            builder.json().init();
        } else {
            builder.init();
        }
    });
}
