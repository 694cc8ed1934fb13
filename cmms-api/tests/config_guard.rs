use rocket::http::Status;
use rocket::local::asynchronous::Client;

use cmms_api::config::{API_KEY_VAR, ConfigError};
use cmms_api::setup_error_rocket;

#[rocket::async_test]
async fn test_missing_configuration_blocks_every_route() {
    let client = Client::tracked(setup_error_rocket(ConfigError::Missing(API_KEY_VAR)))
        .await
        .expect("valid rocket instance");

    for path in ["/", "/dashboard", "/api/1/status", "/api/1/equipment"] {
        let response = client.get(path).dispatch().await;
        assert_eq!(response.status(), Status::ServiceUnavailable, "GET {path}");
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body["configuration_required"], true);
        assert!(body["error"].as_str().unwrap().contains("CMMS_API_KEY"));
    }
}

#[rocket::async_test]
async fn test_non_get_requests_get_the_notice_too() {
    let client = Client::tracked(setup_error_rocket(ConfigError::Placeholder(API_KEY_VAR)))
        .await
        .expect("valid rocket instance");

    let response = client.post("/api/1/login").dispatch().await;
    assert_eq!(response.status(), Status::ServiceUnavailable);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["configuration_required"], true);
    assert!(body["error"].as_str().unwrap().contains("placeholder"));
}
