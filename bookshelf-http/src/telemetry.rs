use tracing_subscriber::{EnvFilter, prelude::*};

use crate::{
    config::TracingConfig,
    error::{AppError, AppResult},
};

/// Installs a formatted stdout subscriber.
///
/// `RUST_LOG` wins over the configured filter when it is set.
///
/// # Errors
///
/// Returns an error if the filter does not parse or a global subscriber is already set.
pub fn install(config: &TracingConfig) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|err| AppError::Tracing(err.to_string()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .try_init()
        .map_err(|err| AppError::Tracing(err.to_string()))
}
