//! Entry point for weather data: live provider when possible, synthetic otherwise.
//!
//! The gateway keeps nothing between calls. Each `fetch_*` call is
//! independent, and overlapping calls for different cities may complete in
//! any order; callers discard stale results themselves.

use std::time::Duration;

use crate::{
    config::Config,
    model::{DataSource, ForecastEntry, UnitSystem, WeatherBundle, WeatherSnapshot},
    provider::{ProviderError, WeatherProvider, provider_from_config},
    synthetic::SyntheticGenerator,
};

/// Why the live path was not used.
#[derive(Debug, thiserror::Error)]
pub enum FallbackReason {
    #[error("no live credential configured")]
    NoCredential,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Outcome of a current-weather lookup before it is collapsed for callers.
#[derive(Debug)]
pub enum Resolution {
    Live(WeatherSnapshot),
    Fallback {
        snapshot: WeatherSnapshot,
        reason: FallbackReason,
    },
}

impl Resolution {
    pub fn source(&self) -> DataSource {
        match self {
            Resolution::Live(_) => DataSource::Live,
            Resolution::Fallback { .. } => DataSource::Synthetic,
        }
    }

    pub fn snapshot(&self) -> &WeatherSnapshot {
        match self {
            Resolution::Live(snapshot) | Resolution::Fallback { snapshot, .. } => snapshot,
        }
    }

    pub fn into_snapshot(self) -> WeatherSnapshot {
        match self {
            Resolution::Live(snapshot) | Resolution::Fallback { snapshot, .. } => snapshot,
        }
    }
}

#[derive(Debug)]
pub struct WeatherGateway {
    provider: Option<Box<dyn WeatherProvider>>,
    synthetic: SyntheticGenerator,
    synthetic_delay: Duration,
}

impl WeatherGateway {
    /// `provider` is `None` when no live credential is available.
    pub fn new(provider: Option<Box<dyn WeatherProvider>>, synthetic: SyntheticGenerator) -> Self {
        Self {
            provider,
            synthetic,
            synthetic_delay: Duration::ZERO,
        }
    }

    /// Pause inserted before synthetic results are returned, to pace the UI.
    pub fn with_synthetic_delay(mut self, delay: Duration) -> Self {
        self.synthetic_delay = delay;
        self
    }

    /// Build the gateway from configuration, read once at startup.
    pub fn from_config(config: &Config) -> Self {
        let provider = provider_from_config(config).unwrap_or_else(|err| {
            tracing::warn!("Live provider unavailable, using synthetic data only: {err}");
            None
        });

        let synthetic = SyntheticGenerator::default().with_lang(config.lang.clone());

        Self::new(provider, synthetic)
            .with_synthetic_delay(Duration::from_millis(config.synthetic_delay_ms))
    }

    pub fn has_live_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Current conditions with their provenance.
    pub async fn resolve_current(&self, city: &str, unit: UnitSystem) -> Resolution {
        let reason = match &self.provider {
            None => FallbackReason::NoCredential,
            Some(provider) => {
                tracing::debug!(city, %unit, "Requesting live weather");
                match provider.current(city, unit).await {
                    Ok(snapshot) => {
                        tracing::info!(city, name = %snapshot.name, "Live weather received");
                        return Resolution::Live(snapshot);
                    }
                    Err(err) => {
                        tracing::warn!(city, "Live weather failed, falling back to synthetic data: {err}");
                        FallbackReason::Provider(err)
                    }
                }
            }
        };

        tracing::info!(city, %unit, %reason, "Using synthetic weather");
        self.pace().await;

        Resolution::Fallback {
            snapshot: self.synthetic.current(city, unit),
            reason,
        }
    }

    /// Current conditions for `city`. Never fails.
    pub async fn fetch_current(&self, city: &str, unit: UnitSystem) -> WeatherSnapshot {
        self.resolve_current(city, unit).await.into_snapshot()
    }

    /// Five-day outlook. Always synthetic, whether or not a credential is
    /// configured.
    pub async fn fetch_forecast(&self, city: &str, unit: UnitSystem) -> Vec<ForecastEntry> {
        tracing::debug!(city, %unit, "Generating synthetic forecast");
        self.pace().await;
        self.synthetic.forecast(unit)
    }

    /// Current conditions and forecast fetched concurrently and joined, so
    /// callers can swap both in at once.
    pub async fn fetch_bundle(&self, city: &str, unit: UnitSystem) -> WeatherBundle {
        let (resolution, forecast) = tokio::join!(
            self.resolve_current(city, unit),
            self.fetch_forecast(city, unit),
        );

        WeatherBundle {
            city: city.to_string(),
            unit,
            source: resolution.source(),
            snapshot: resolution.into_snapshot(),
            forecast,
        }
    }

    async fn pace(&self) {
        if !self.synthetic_delay.is_zero() {
            tokio::time::sleep(self.synthetic_delay).await;
        }
    }
}
