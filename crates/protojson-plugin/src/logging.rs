//! Diagnostics for the plugin process.
//!
//! stdout carries the protocol response, so log output goes to stderr.

use protojson_core::{CodegenError, CodegenResult};
use tracing_subscriber::EnvFilter;

/// Build the level filter from the configured `log_level`.
pub fn build_filter(level: &str) -> CodegenResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| CodegenError::Config(format!("invalid log_level {level:?}: {e}")))
}

/// Install a stderr fmt subscriber as the global default.
///
/// Ignores the error if a subscriber is already installed.
pub fn init_logging(level: &str) -> CodegenResult<()> {
    use tracing_subscriber::prelude::*;

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(level)?)
        .with(layer);

    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}
