use adi_lookup::app::ports::{CensusBlockPort, GeocoderPort};
use adi_lookup::config::{CensusBlockConfig, GeocoderConfig};
use adi_lookup::domain::Coordinates;
use adi_lookup::error::AdiError;
use adi_lookup::infra::fcc_census_block::FccCensusBlockClient;
use adi_lookup::infra::google_geocoder::GoogleGeocoder;
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn geocoder_for(server: &MockServer) -> GoogleGeocoder {
    let config = GeocoderConfig {
        base_url: format!("{}/maps/api/geocode/json", server.uri()),
        api_key_env: "UNUSED".to_string(),
        timeout_seconds: 5,
    };
    GoogleGeocoder::new(&config, "test-key").unwrap()
}

fn census_for(server: &MockServer) -> FccCensusBlockClient {
    let config = CensusBlockConfig {
        base_url: format!("{}/api/census/block/find", server.uri()),
        timeout_seconds: 5,
    };
    FccCensusBlockClient::new(&config).unwrap()
}

#[tokio::test]
async fn geocoder_returns_first_result_location() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "123 Main St  Madison WI 53703"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                {
                    "formatted_address": "123 Main St, Madison, WI 53703, USA",
                    "geometry": {"location": {"lat": 43.0731, "lng": -89.4012}, "location_type": "ROOFTOP"}
                },
                {
                    "formatted_address": "123 Main St, Middleton, WI, USA",
                    "geometry": {"location": {"lat": 1.0, "lng": 2.0}}
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hit = geocoder_for(&mock_server)
        .geocode("123 Main St  Madison WI 53703")
        .await
        .unwrap()
        .expect("a match");

    assert_eq!(hit.geometry.location.lat, 43.0731);
    assert_eq!(hit.geometry.location.lng, -89.4012);
    assert_eq!(
        hit.formatted_address.as_deref(),
        Some("123 Main St, Madison, WI 53703, USA")
    );
}

#[tokio::test]
async fn geocoder_zero_results_is_no_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let result = geocoder_for(&mock_server).geocode("nowhere").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn geocoder_denied_request_is_an_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let err = geocoder_for(&mock_server).geocode("anywhere").await.unwrap_err();
    match err {
        AdiError::Api { message } => {
            assert!(message.contains("REQUEST_DENIED"));
            assert!(message.contains("API key is invalid"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn geocoder_server_error_is_propagated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = geocoder_for(&mock_server).geocode("anywhere").await.unwrap_err();
    assert!(matches!(err, AdiError::Http(_)));
}

#[tokio::test]
async fn census_lookup_sends_coordinates_year_and_format() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/census/block/find"))
        .and(query_param("latitude", "43.0731"))
        .and(query_param("longitude", "-89.4012"))
        .and(query_param("censusYear", "2020"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Block": {"FIPS": "550250016021001", "bbox": []},
            "County": {"FIPS": "55025", "name": "Dane County"},
            "State": {"FIPS": "55", "code": "WI", "name": "Wisconsin"},
            "status": "OK"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = census_for(&mock_server)
        .find_block(
            Coordinates {
                latitude: 43.0731,
                longitude: -89.4012,
            },
            2020,
        )
        .await
        .unwrap();

    assert_eq!(body["Block"]["FIPS"], "550250016021001");
}

#[tokio::test]
async fn census_lookup_non_json_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let result = census_for(&mock_server)
        .find_block(
            Coordinates {
                latitude: 1.0,
                longitude: 2.0,
            },
            2010,
        )
        .await;

    assert!(matches!(result, Err(AdiError::Json(_))));
}
