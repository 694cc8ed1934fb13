use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::json;

use cmms_api::models::User;
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
async fn test_user_endpoints_require_authentication() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");

    let response = client.get("/api/1/users").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);

    let response = client
        .post("/api/1/users")
        .json(&json!({ "name": "X", "email": "x@example.com", "roles": ["Requester"] }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[rocket::async_test]
async fn test_list_users_includes_the_bootstrap_admin() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin_cookie = login_admin(&client).await;

    let response = client
        .get("/api/1/users")
        .cookie(admin_cookie)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let users: Vec<User> = response.into_json().await.unwrap();
    assert!(users.iter().any(|u| u.email == "admin@example.com"));
}

#[rocket::async_test]
async fn test_composite_create_returns_exactly_the_submitted_roles() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin_cookie = login_admin(&client).await;

    let response = client
        .post("/api/1/users")
        .cookie(admin_cookie.clone())
        .json(&json!({
            "name": "Marco Rossi",
            "email": "m.rossi@example.com",
            "roles": ["Periodic Maintenance Manager", "Requester"]
        }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
    let created: User = response.into_json().await.expect("valid user JSON");

    assert_eq!(created.name, "Marco Rossi");
    assert_eq!(created.email, "m.rossi@example.com");
    let labels: Vec<String> = created.roles.iter().map(|r| r.to_string()).collect();
    assert_eq!(labels, vec!["Periodic Maintenance Manager", "Requester"]);
    assert!(created.avatar_url.contains("Marco%20Rossi"));

    // The new profile is in the directory.
    let response = client
        .get("/api/1/users")
        .cookie(admin_cookie)
        .dispatch()
        .await;
    let users: Vec<User> = response.into_json().await.unwrap();
    assert!(users.iter().any(|u| u.id == created.id));
}

#[rocket::async_test]
async fn test_duplicate_email_surfaces_an_auth_error() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin_cookie = login_admin(&client).await;

    let payload = json!({
        "name": "Marco Rossi",
        "email": "m.rossi@example.com",
        "roles": ["Requester"]
    });

    let response = client
        .post("/api/1/users")
        .cookie(admin_cookie.clone())
        .json(&payload)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);

    // The auth step fails on the duplicate identity; the error surface
    // names the failed step and no success is reported.
    let response = client
        .post("/api/1/users")
        .cookie(admin_cookie)
        .json(&payload)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Conflict);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Auth Error: "));
}

#[rocket::async_test]
async fn test_create_user_validation() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin_cookie = login_admin(&client).await;

    // Empty role set.
    let response = client
        .post("/api/1/users")
        .cookie(admin_cookie.clone())
        .json(&json!({ "name": "Marco", "email": "m@example.com", "roles": [] }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert_eq!(body["error"], "At least one role must be provided");

    // Blank name.
    let response = client
        .post("/api/1/users")
        .cookie(admin_cookie)
        .json(&json!({ "name": " ", "email": "m@example.com", "roles": ["Requester"] }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[rocket::async_test]
async fn test_create_user_is_admin_gated() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");

    // Self-service signup yields a Requester, not an Admin.
    let response = client
        .post("/api/1/signup")
        .json(&json!({ "email": "plain@example.com", "password": "pw-123456" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let requester_cookie = response
        .cookies()
        .get("session")
        .expect("session cookie should be set")
        .clone()
        .into_owned();

    let response = client
        .post("/api/1/users")
        .cookie(requester_cookie)
        .json(&json!({ "name": "X", "email": "x@example.com", "roles": ["Requester"] }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);
}
