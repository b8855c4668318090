//! Tracing subscriber setup: env filter plus a JSON or human-readable console layer.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LogFormat};

/// Install the global subscriber. `RUST_LOG` wins over the configured default filter.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with((config.log_format == LogFormat::Json).then(|| fmt::layer().json()))
        .with((config.log_format == LogFormat::Pretty).then(|| fmt::layer()))
        .try_init()
        .context("failed to install tracing subscriber")
}
