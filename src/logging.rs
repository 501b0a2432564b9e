//! Diagnostic logging on stderr.
//!
//! Reads `RUST_LOG`, defaulting to `warn`. Command results go to stdout and are
//! not affected.
//!
//! ```bash
//! RUST_LOG=sheetkeeper_core=debug sheetkeeper tracker.grd edit C4 Completed
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
