//! Weather tool HTTP behavior against a mock server.

use nimbus::tools::registry::Tool;
use nimbus::{IdentityContext, WeatherTool};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn weather_body() -> serde_json::Value {
    json!({
        "name": "Lisbon",
        "weather": [{"description": "clear sky"}],
        "main": {
            "temp": 21.3,
            "feels_like": 20.9,
            "temp_min": 18.0,
            "temp_max": 24.5,
            "humidity": 55
        },
        "wind": {"speed": 3.6}
    })
}

#[tokio::test]
async fn successful_lookup_formats_conditions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Lisbon"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body()))
        .mount(&server)
        .await;

    let tool = WeatherTool::new(Some("test-key".to_string())).with_api_base(server.uri());
    let identity = IdentityContext::new();

    let result = tool
        .execute(json!({"city": "Lisbon"}), &identity)
        .await
        .unwrap();
    assert!(result.contains("Weather in Lisbon"));
    assert!(result.contains("clear sky"));
    assert!(result.contains("21.3C"));
    assert!(result.contains("Humidity: 55%"));
}

#[tokio::test]
async fn unknown_city_maps_to_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tool = WeatherTool::new(Some("test-key".to_string())).with_api_base(server.uri());
    let identity = IdentityContext::new();

    let result = tool
        .execute(json!({"city": "Atlantis"}), &identity)
        .await
        .unwrap();
    assert_eq!(result, "I could not find a city named 'Atlantis'.");
}

#[tokio::test]
async fn rejected_credentials_map_to_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let tool = WeatherTool::new(Some("bad-key".to_string())).with_api_base(server.uri());
    let identity = IdentityContext::new();

    let result = tool
        .execute(json!({"city": "Lisbon"}), &identity)
        .await
        .unwrap();
    assert!(result.contains("rejected the configured credentials"));
}

#[tokio::test]
async fn server_error_maps_to_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let tool = WeatherTool::new(Some("test-key".to_string())).with_api_base(server.uri());
    let identity = IdentityContext::new();

    let result = tool
        .execute(json!({"city": "Lisbon"}), &identity)
        .await
        .unwrap();
    assert!(result.contains("returned an error (503)"));
}

#[tokio::test]
async fn unreachable_service_maps_to_sentinel() {
    // Nothing listens on this port.
    let tool =
        WeatherTool::new(Some("test-key".to_string())).with_api_base("http://127.0.0.1:1");
    let identity = IdentityContext::new();

    let result = tool
        .execute(json!({"city": "Lisbon"}), &identity)
        .await
        .unwrap();
    assert!(result.contains("could not reach the weather service"));
}
