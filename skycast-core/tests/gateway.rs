//! Gateway and geocoder behaviour against a mock OpenWeather server.

use std::time::Duration;

use skycast_core::{
    Config, DataSource, FallbackReason, ProviderError, ReverseGeocoder, Resolution, UNKNOWN_LOCATION,
    UnitSystem, WeatherGateway,
};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, api_key: Option<&str>) -> Config {
    Config {
        api_key: api_key.map(str::to_string),
        base_url: server.uri(),
        synthetic_delay_ms: 0,
        timeout_ms: 1_000,
        ..Config::default()
    }
}

fn current_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 106.8451, "lat": -6.2146 },
        "weather": [{ "id": 500, "main": "Rain", "description": "hujan ringan", "icon": "10d" }],
        "main": {
            "temp": 27.4, "feels_like": 30.2, "temp_min": 26.0, "temp_max": 28.9,
            "pressure": 1008, "humidity": 88
        },
        "visibility": 8000,
        "wind": { "speed": 4.1, "deg": 250 },
        "dt": 1_700_000_000,
        "sys": { "country": "ID", "sunrise": 1_699_999_000, "sunset": 1_700_040_000 },
        "name": name,
        "cod": 200
    })
}

#[tokio::test]
async fn live_response_is_used_when_credential_present() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Jakarta"))
        .and(query_param("appid", "REAL_KEY"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Jakarta")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = WeatherGateway::from_config(&config_for(&server, Some("REAL_KEY")));
    let resolution = gateway.resolve_current("Jakarta", UnitSystem::Metric).await;

    assert_eq!(resolution.source(), DataSource::Live);
    let snapshot = resolution.into_snapshot();
    assert_eq!(snapshot.name, "Jakarta");
    assert_eq!(snapshot.temp, 27.4);
    assert_eq!(snapshot.humidity, 88);
    assert_eq!(snapshot.description, "hujan ringan");
    assert_eq!(snapshot.wind_deg, Some(250));
}

#[tokio::test]
async fn imperial_is_requested_from_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Boston")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = WeatherGateway::from_config(&config_for(&server, Some("REAL_KEY")));
    let snapshot = gateway.fetch_current("Boston", UnitSystem::Imperial).await;

    // Values pass through untouched; only the unit tag follows the request.
    assert_eq!(snapshot.unit, UnitSystem::Imperial);
    assert_eq!(snapshot.temp, 27.4);
}

#[tokio::test]
async fn error_status_falls_back_to_synthetic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#))
        .mount(&server)
        .await;

    let gateway = WeatherGateway::from_config(&config_for(&server, Some("REAL_KEY")));
    let resolution = gateway.resolve_current("Bandung", UnitSystem::Metric).await;

    match resolution {
        Resolution::Fallback { snapshot, reason } => {
            assert_eq!(snapshot.name, "Bandung");
            match reason {
                FallbackReason::Provider(ProviderError::Status { status, body }) => {
                    assert_eq!(status.as_u16(), 401);
                    assert!(body.contains("Invalid API key"));
                }
                other => panic!("unexpected reason: {other:?}"),
            }
        }
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_provider_times_out_and_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body("Jakarta"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = Config { timeout_ms: 50, ..config_for(&server, Some("REAL_KEY")) };
    let gateway = WeatherGateway::from_config(&config);
    let resolution = gateway.resolve_current("Jakarta", UnitSystem::Metric).await;

    assert!(matches!(
        resolution,
        Resolution::Fallback { reason: FallbackReason::Provider(ProviderError::Timeout), .. }
    ));
}

#[tokio::test]
async fn malformed_body_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let gateway = WeatherGateway::from_config(&config_for(&server, Some("REAL_KEY")));
    let resolution = gateway.resolve_current("Jakarta", UnitSystem::Metric).await;

    assert!(matches!(
        resolution,
        Resolution::Fallback { reason: FallbackReason::Provider(ProviderError::Parse(_)), .. }
    ));
    assert_eq!(resolution.snapshot().name, "Jakarta");
}

#[tokio::test]
async fn placeholder_credential_never_hits_network() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for key in ["demo_key", "my_example_key", ""] {
        let gateway = WeatherGateway::from_config(&config_for(&server, Some(key)));
        assert!(!gateway.has_live_provider());

        let snapshot = gateway.fetch_current("Jakarta", UnitSystem::Metric).await;
        assert_eq!(snapshot.name, "Jakarta");
    }

    server.verify().await;
}

#[tokio::test]
async fn forecast_is_synthetic_even_with_credential() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = WeatherGateway::from_config(&config_for(&server, Some("REAL_KEY")));
    let before = chrono::Utc::now().timestamp();
    let forecast = gateway.fetch_forecast("Jakarta", UnitSystem::Metric).await;
    let after = chrono::Utc::now().timestamp();

    assert_eq!(forecast.len(), 5);
    assert!(forecast[0].dt >= before + 86_400 && forecast[0].dt <= after + 86_400);
    for pair in forecast.windows(2) {
        assert_eq!(pair[1].dt - pair[0].dt, 86_400);
    }

    server.verify().await;
}

#[tokio::test]
async fn no_credential_current_is_plausible() {
    let gateway = WeatherGateway::from_config(&Config { synthetic_delay_ms: 0, ..Config::default() });

    for _ in 0..20 {
        let snapshot = gateway.fetch_current("Jakarta", UnitSystem::Metric).await;

        assert_eq!(snapshot.name, "Jakarta");
        assert!((28.0..=33.0).contains(&snapshot.temp));
        assert!((70..=90).contains(&snapshot.humidity));
    }
}

#[tokio::test]
async fn bundle_reports_live_source() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Jakarta")))
        .mount(&server)
        .await;

    let gateway = WeatherGateway::from_config(&config_for(&server, Some("REAL_KEY")));
    let bundle = gateway.fetch_bundle("Jakarta", UnitSystem::Metric).await;

    assert_eq!(bundle.source, DataSource::Live);
    assert_eq!(bundle.forecast.len(), 5);
}

#[tokio::test]
async fn reverse_geocode_resolves_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .and(query_param("limit", "1"))
        .and(query_param("appid", "REAL_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Kuningan", "lat": -6.97, "lon": 108.48, "country": "ID" }
        ])))
        .mount(&server)
        .await;

    let geocoder = ReverseGeocoder::from_config(&config_for(&server, Some("REAL_KEY")));
    assert_eq!(geocoder.city_name(-6.97, 108.48).await, "Kuningan");
}

#[tokio::test]
async fn reverse_geocode_failures_yield_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .and(query_param("lat", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .and(query_param("lat", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let geocoder = ReverseGeocoder::from_config(&config_for(&server, Some("REAL_KEY")));
    assert_eq!(geocoder.city_name(1.0, 0.0).await, UNKNOWN_LOCATION);
    assert_eq!(geocoder.city_name(2.0, 0.0).await, UNKNOWN_LOCATION);
}
