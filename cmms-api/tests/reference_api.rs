use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::json;

use cmms_api::orm::testing::test_rocket;

/// Helper to login as the bootstrap admin and get the session cookie
async fn login_admin(client: &Client) -> rocket::http::Cookie<'static> {
    let login_body = json!({
        "email": "admin@example.com",
        "password": "admin"
    });

    let response = client
        .post("/api/1/login")
        .header(ContentType::JSON)
        .body(login_body.to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    response
        .cookies()
        .get("session")
        .expect("Session cookie should be set")
        .clone()
        .into_owned()
}

#[rocket::async_test]
async fn test_reference_requires_authentication() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");

    let response = client.get("/api/1/reference").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);

    let response = client.post("/api/1/reference/reload").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[rocket::async_test]
async fn test_initial_snapshot_contains_the_bootstrap_admin() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin_cookie = login_admin(&client).await;

    let response = client
        .get("/api/1/reference")
        .cookie(admin_cookie)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let snapshot: serde_json::Value = response.into_json().await.unwrap();

    assert!(snapshot["error"].is_null());
    let users = snapshot["users"].as_array().unwrap();
    assert!(users.iter().any(|u| u["email"] == "admin@example.com"));
    assert!(snapshot["companies"].as_array().unwrap().is_empty());
    assert!(snapshot["sites"].as_array().unwrap().is_empty());
}

#[rocket::async_test]
async fn test_user_writes_do_not_reload_the_cache_until_asked() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin_cookie = login_admin(&client).await;

    // The composite user write intentionally skips the reference reload.
    let response = client
        .post("/api/1/users")
        .cookie(admin_cookie.clone())
        .json(&json!({
            "name": "Marco Rossi",
            "email": "m.rossi@example.com",
            "roles": ["Requester"]
        }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);

    let response = client
        .get("/api/1/reference")
        .cookie(admin_cookie.clone())
        .dispatch()
        .await;
    let snapshot: serde_json::Value = response.into_json().await.unwrap();
    let users = snapshot["users"].as_array().unwrap();
    assert!(
        !users.iter().any(|u| u["email"] == "m.rossi@example.com"),
        "stale snapshot should not see the new user yet"
    );

    // A manual reload swaps in a fresh snapshot. Last write wins.
    let response = client
        .post("/api/1/reference/reload")
        .cookie(admin_cookie)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let snapshot: serde_json::Value = response.into_json().await.unwrap();
    let users = snapshot["users"].as_array().unwrap();
    assert!(users.iter().any(|u| u["email"] == "m.rossi@example.com"));
}
