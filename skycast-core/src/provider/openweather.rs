use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::model::{ConditionCategory, Coordinates, UnitSystem, WeatherSnapshot};

use super::{ProviderError, WeatherProvider};

/// OpenWeather caps reported visibility at 10 km and omits the field in some
/// responses.
const MAX_REPORTED_VISIBILITY_M: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    lang: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(
        api_key: String,
        base_url: &str,
        lang: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProviderError::Client)?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            lang: lang.to_string(),
            http,
        })
    }

    async fn fetch_current(&self, city: &str, unit: UnitSystem) -> Result<WeatherSnapshot, ProviderError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", unit.as_str()),
                ("lang", self.lang.as_str()),
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

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(parsed.into_snapshot(unit))
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
    deg: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: Option<OwCoord>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    visibility: Option<u32>,
    #[serde(default)]
    sys: OwSys,
}

impl OwCurrentResponse {
    /// Field-for-field mapping. Units were chosen in the request, so values
    /// are not converted here.
    fn into_snapshot(self, unit: UnitSystem) -> WeatherSnapshot {
        let weather = self.weather.into_iter().next();

        let (condition, description, icon) = match weather {
            Some(w) => (ConditionCategory::from(w.main), w.description, w.icon),
            None => (ConditionCategory::Other("Unknown".to_string()), String::new(), None),
        };

        WeatherSnapshot {
            name: self.name,
            country: self.sys.country,
            coord: self.coord.map(|c| Coordinates { lat: c.lat, lon: c.lon }),
            unit,
            temp: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity: self.main.humidity.min(100),
            pressure: self.main.pressure,
            visibility: self.visibility.unwrap_or(MAX_REPORTED_VISIBILITY_M),
            wind_speed: self.wind.speed,
            wind_deg: self.wind.deg.map(|d| d.rem_euclid(360.0) as u16),
            condition,
            description,
            icon,
            dt: self.dt,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str, unit: UnitSystem) -> Result<WeatherSnapshot, ProviderError> {
        self.fetch_current(city, unit).await
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAKARTA: &str = r#"{
        "coord": { "lon": 106.8451, "lat": -6.2146 },
        "weather": [{ "id": 801, "main": "Clouds", "description": "berawan", "icon": "02d" }],
        "main": {
            "temp": 30.5, "feels_like": 35.1, "temp_min": 29, "temp_max": 32,
            "pressure": 1010, "humidity": 75
        },
        "visibility": 9000,
        "wind": { "speed": 3.6, "deg": 170 },
        "clouds": { "all": 20 },
        "dt": 1700000000,
        "sys": { "country": "ID", "sunrise": 1699999000, "sunset": 1700040000 },
        "timezone": 25200,
        "id": 1642911,
        "name": "Jakarta",
        "cod": 200
    }"#;

    #[test]
    fn maps_response_without_conversion() {
        let parsed: OwCurrentResponse = serde_json::from_str(JAKARTA).unwrap();
        let s = parsed.into_snapshot(UnitSystem::Imperial);

        assert_eq!(s.name, "Jakarta");
        assert_eq!(s.country.as_deref(), Some("ID"));
        assert_eq!(s.coord, Some(Coordinates { lat: -6.2146, lon: 106.8451 }));
        assert_eq!(s.unit, UnitSystem::Imperial);
        assert_eq!(s.temp, 30.5);
        assert_eq!(s.feels_like, 35.1);
        assert_eq!(s.temp_min, 29.0);
        assert_eq!(s.temp_max, 32.0);
        assert_eq!(s.humidity, 75);
        assert_eq!(s.pressure, 1010);
        assert_eq!(s.visibility, 9000);
        assert_eq!(s.wind_speed, 3.6);
        assert_eq!(s.wind_deg, Some(170));
        assert_eq!(s.condition, ConditionCategory::Clouds);
        assert_eq!(s.description, "berawan");
        assert_eq!(s.icon.as_deref(), Some("02d"));
        assert_eq!(s.dt, 1_700_000_000);
        assert_eq!(s.sunrise, Some(1_699_999_000));
        assert_eq!(s.sunset, Some(1_700_040_000));
    }

    #[test]
    fn sparse_response_uses_defaults() {
        let body = r#"{
            "name": "Nowhere", "dt": 1,
            "main": { "temp": 1, "feels_like": 0, "temp_min": 0, "temp_max": 2, "pressure": 990, "humidity": 40 }
        }"#;
        let s = serde_json::from_str::<OwCurrentResponse>(body)
            .unwrap()
            .into_snapshot(UnitSystem::Metric);

        assert_eq!(s.country, None);
        assert_eq!(s.coord, None);
        assert_eq!(s.visibility, MAX_REPORTED_VISIBILITY_M);
        assert_eq!(s.wind_speed, 0.0);
        assert_eq!(s.wind_deg, None);
        assert_eq!(s.icon, None);
        assert_eq!(s.condition, ConditionCategory::Other("Unknown".into()));
    }

    #[test]
    fn truncate_long_bodies() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
