//! Contract tests for the OpenWeather client against a local mock
//! server, including the full fixture-response render scenario.

use nowcast_core::{
    Coordinate, CycleError, DisplayState, Icon, OpenWeatherClient, UnitSystem, WeatherClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paris_fixture() -> serde_json::Value {
    serde_json::json!({
        "name": "Paris",
        "sys": {"country": "FR", "sunrise": 1_700_000_000u32, "sunset": 1_700_030_000u32},
        "main": {"temp": 15.2, "temp_min": 13.0, "temp_max": 17.0, "pressure": 1012, "humidity": 60},
        "weather": [{"description": "clear sky", "icon": "01d"}],
        "wind": {"speed": 5.0},
        "visibility": 10000
    })
}

fn paris() -> Coordinate {
    Coordinate::new(48.8566, 2.3522).expect("valid coordinate")
}

#[tokio::test]
async fn fetch_sends_expected_query_and_parses_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url("test-key", server.uri()).unwrap();
    let snapshot = client.fetch(paris(), UnitSystem::Metric).await.unwrap();

    assert_eq!(snapshot.city_name, "Paris");
    assert_eq!(snapshot.country_code, "FR");
    assert_eq!(snapshot.temp, 15.2);
    assert_eq!(snapshot.temp_min, 13.0);
    assert_eq!(snapshot.temp_max, 17.0);
    assert_eq!(snapshot.wind_speed_mph, 5.0);
    assert_eq!(snapshot.pressure_hpa, 1012.0);
    assert_eq!(snapshot.humidity_pct, 60.0);
    assert_eq!(snapshot.visibility_m, 10000.0);
    assert_eq!(snapshot.sunrise_unix, 1_700_000_000);
    assert_eq!(snapshot.sunset_unix, 1_700_030_000);
}

#[tokio::test]
async fn fixture_response_renders_expected_display_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_fixture()))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url("test-key", server.uri()).unwrap();
    let snapshot = client.fetch(paris(), UnitSystem::Metric).await.unwrap();
    let state = DisplayState::from_snapshot(&snapshot, "fr_FR");

    assert_eq!(state.city, "Paris, ");
    assert_eq!(state.country, "FR");
    assert_eq!(state.description, "clear sky");
    assert_eq!(state.temperature, "15.2°C");
    assert_eq!(state.icon, Some(Icon::Sun));
}

#[tokio::test]
async fn imperial_units_pass_through_to_the_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url("test-key", server.uri()).unwrap();
    client.fetch(paris(), UnitSystem::Imperial).await.unwrap();
}

#[tokio::test]
async fn non_2xx_status_is_an_api_failure_with_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
        )
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url("bad-key", server.uri()).unwrap();
    let err = client.fetch(paris(), UnitSystem::Metric).await.unwrap_err();

    match err {
        CycleError::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("expected Api failure, got {other:?}"),
    }
}

#[tokio::test]
async fn long_multibyte_error_body_still_surfaces_as_api_failure() {
    let server = MockServer::start().await;

    // An error body whose 'é' straddles the truncation cutoff at byte 200.
    let body = format!("{}é{}", "x".repeat(199), "y".repeat(100));
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url("test-key", server.uri()).unwrap();
    let err = client.fetch(paris(), UnitSystem::Metric).await.unwrap_err();

    match err {
        CycleError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.ends_with("..."));
        }
        other => panic!("expected Api failure, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_an_api_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url("test-key", server.uri()).unwrap();
    let err = client.fetch(paris(), UnitSystem::Metric).await.unwrap_err();

    assert!(matches!(err, CycleError::Api { status: 200, .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    // Bind-then-drop leaves a port with nothing listening on it. This needs
    // a non-pooled server: `MockServer::start()` leases from a shared pool
    // whose listener stays open after drop.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = OpenWeatherClient::with_base_url("test-key", uri).unwrap();
    let err = client.fetch(paris(), UnitSystem::Metric).await.unwrap_err();

    assert!(matches!(err, CycleError::Transport { .. }));
}

#[tokio::test]
async fn exactly_one_request_per_invocation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url("test-key", server.uri()).unwrap();
    // A failure is terminal; no retry is attempted.
    let _ = client.fetch(paris(), UnitSystem::Metric).await.unwrap_err();

    server.verify().await;
}
