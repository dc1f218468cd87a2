//! Diagnostic logging
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - trigger and highlight lifecycle
//! - `RUST_LOG=uemacs_flash::flash=trace` - region resolution for every firing
//!
//! Output goes to stderr so rendered frames on stdout stay clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber; warnings only unless RUST_LOG says otherwise
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    // A subscriber may already be set (tests, embedding hosts)
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
