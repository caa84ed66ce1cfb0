use crate::{
    Config, UnitSystem, WeatherSnapshot, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// Ways a single live request can fail. The gateway never surfaces these to
/// its callers; they decide the fallback and get logged.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Network(err)
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One best-effort request for current conditions, already in `unit`.
    async fn current(&self, city: &str, unit: UnitSystem) -> Result<WeatherSnapshot, ProviderError>;
}

/// Construct the live provider from config.
///
/// Returns `Ok(None)` when no usable credential is configured.
pub fn provider_from_config(
    config: &Config,
) -> Result<Option<Box<dyn WeatherProvider>>, ProviderError> {
    let Some(api_key) = config.live_api_key() else {
        return Ok(None);
    };

    let provider = OpenWeatherProvider::new(
        api_key.to_owned(),
        &config.base_url,
        &config.lang,
        Duration::from_millis(config.timeout_ms),
    )?;

    Ok(Some(Box::new(provider)))
}
