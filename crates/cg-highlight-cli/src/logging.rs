//! Log output for the command-line driver
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - pass summaries
//! - `RUST_LOG=cg_highlight=trace` - every skipped node, and every
//!   highlight when `--trace` is given
//! - `RUST_LOG=cg_highlight::diagnostics=warn` - only recorded mismatches

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the stderr subscriber. Defaults to `warn` when RUST_LOG is
/// unset or invalid.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}
