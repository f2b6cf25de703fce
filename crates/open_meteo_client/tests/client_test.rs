//! Wiremock tests for the forecast fetch.

use common::Error;
use open_meteo_client::OpenMeteoClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Two full days of samples; day 0 ramps 0..23, day 1 ramps 100..123.
fn two_day_body() -> serde_json::Value {
    let time: Vec<String> = (0..48)
        .map(|i| format!("2025-06-{:02}T{:02}:00", 7 + i / 24, i % 24))
        .collect();
    let temps: Vec<f64> = (0..48)
        .map(|i| if i < 24 { i as f64 } else { 76.0 + i as f64 })
        .collect();

    serde_json::json!({
        "latitude": 40.74,
        "longitude": -74.17,
        "generationtime_ms": 0.05,
        "utc_offset_seconds": -14400,
        "timezone": "America/New_York",
        "timezone_abbreviation": "EDT",
        "elevation": 12.0,
        "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
        "hourly": {"time": time, "temperature_2m": temps}
    })
}

#[tokio::test]
async fn forecast_is_split_into_days() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "40.74"))
        .and(query_param("longitude", "-74.17"))
        .and(query_param("hourly", "temperature_2m"))
        .and(query_param("forecast_days", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_day_body()))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::with_base_url(server.uri())
        .expect("client")
        .forecast_days(2);
    let forecast = client
        .get_forecast(40.74, -74.17, 5)
        .await
        .expect("forecast should load");

    assert_eq!(forecast.utc_offset_seconds, -14400);
    assert_eq!(forecast.series.day_count(), 2);

    let tomorrow = forecast.series.day_window(1).expect("second day");
    let (ts, temp) = tomorrow.at(0).expect("midnight");
    assert_eq!(ts.as_str(), "2025-06-08T00:00");
    assert_eq!(temp, 100.0);
    assert_eq!(ts.to_string(), "2025-06-08 at 12:00 AM");

    assert!(forecast.series.day_window(2).is_err());
}

#[tokio::test]
async fn mismatched_hourly_block_is_rejected() {
    let server = MockServer::start().await;
    let mut body = two_day_body();
    body["hourly"]["temperature_2m"]
        .as_array_mut()
        .expect("array")
        .pop();

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::with_base_url(server.uri()).expect("client");
    let err = client
        .get_forecast(40.74, -74.17, 5)
        .await
        .expect_err("lengths differ");

    assert!(matches!(
        err,
        Error::LengthMismatch {
            timestamps: 48,
            values: 47
        }
    ));
}

#[tokio::test]
async fn bad_status_is_weather_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"error": true, "reason": "Latitude must be in range"})),
        )
        .mount(&server)
        .await;

    let client = OpenMeteoClient::with_base_url(server.uri()).expect("client");
    let err = client.fetch(140.0, 0.0).await.expect_err("bad request");

    match err {
        Error::Weather(msg) => assert!(msg.contains("400"), "unexpected message: {msg}"),
        other => panic!("unexpected error: {other}"),
    }
}
