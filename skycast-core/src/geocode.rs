//! Reverse geocoding: coordinates to a place name usable as a city query.
//! Best-effort; any failure yields [`UNKNOWN_LOCATION`].

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{config::Config, provider::ProviderError, provider::openweather::truncate_body};

pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Deserialize)]
struct GeoEntry {
    name: String,
}

#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    api_key: Option<String>,
    base_url: String,
    http: Option<Client>,
}

impl ReverseGeocoder {
    pub fn new(api_key: Option<String>, base_url: &str, timeout: Duration) -> Self {
        let http = match Client::builder().timeout(timeout).build() {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!("Failed to create geocoding client: {}", e);
                None
            }
        };

        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.live_api_key().map(str::to_owned),
            &config.base_url,
            Duration::from_millis(config.timeout_ms),
        )
    }

    /// Place name for the coordinates, or [`UNKNOWN_LOCATION`].
    pub async fn city_name(&self, lat: f64, lon: f64) -> String {
        match self.lookup(lat, lon).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                tracing::debug!(lat, lon, "Reverse geocode returned no match");
                UNKNOWN_LOCATION.to_string()
            }
            Err(e) => {
                tracing::debug!(lat, lon, "Reverse geocode failed: {}", e);
                UNKNOWN_LOCATION.to_string()
            }
        }
    }

    async fn lookup(&self, lat: f64, lon: f64) -> Result<Option<String>, ProviderError> {
        let (Some(api_key), Some(http)) = (self.api_key.as_deref(), self.http.as_ref()) else {
            return Ok(None);
        };

        let url = format!("{}/geo/1.0/reverse", self.base_url);

        let res = http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("limit", "1".to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let entries: Vec<GeoEntry> = serde_json::from_str(&body)?;

        Ok(entries
            .into_iter()
            .map(|e| e.name)
            .find(|name| !name.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn without_key_returns_sentinel() {
        let geocoder = ReverseGeocoder::from_config(&Config::default());
        assert_eq!(geocoder.city_name(-6.97, 108.48).await, UNKNOWN_LOCATION);
    }

    #[test]
    fn geo_entries_parse() {
        let body = r#"[{"name":"Kuningan","lat":-6.97,"lon":108.48,"country":"ID"}]"#;
        let entries: Vec<GeoEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries[0].name, "Kuningan");
    }
}
