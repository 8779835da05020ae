//! Tracing set-up for the FinTrack binary
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary so embedders can bring their own.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global fmt subscriber once
///
/// `RUST_LOG` wins when set and valid; otherwise `default_filter` is used
/// (for example `fintrack=info`). Events go to stderr so report output on
/// stdout stays clean.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("fintrack=info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
