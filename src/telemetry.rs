//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the filter: `RUST_LOG` first, then `configured`, then
/// [`DEFAULT_LOG_FILTER`]. An unparsable configured filter falls back to
/// the default.
#[must_use]
pub fn filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        configured
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    })
}

/// Installs a stderr fmt subscriber as the global default.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init(configured: Option<&str>) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter(configured))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
