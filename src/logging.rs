//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::app::LoggingConfig;

/// Installs a global fmt subscriber
///
/// `RUST_LOG` wins over the configured filter. Does nothing if a subscriber
/// is already installed, so hosts that set up their own logging keep it.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
