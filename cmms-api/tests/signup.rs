use rocket::http::Status;
use rocket::local::asynchronous::Client;
use serde_json::json;

use cmms_api::orm::testing::test_rocket;

#[rocket::async_test]
async fn test_signup_derives_name_and_signs_in() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");

    let response = client
        .post("/api/1/signup")
        .json(&json!({
            "email": "m.rossi@example.com",
            "password": "hunter2hunter2"
        }))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert!(response.cookies().get("session").is_some());

    let body: serde_json::Value = response.into_json().await.unwrap();
    // Display name comes from the email local-part.
    assert_eq!(body["name"], "m.rossi");
    assert_eq!(body["email"], "m.rossi@example.com");
    // The trigger-created profile starts with the Requester role.
    let roles = body["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0], "Requester");
    // Avatar URL is derived from the URL-encoded name.
    let avatar = body["avatar_url"].as_str().unwrap();
    assert!(avatar.starts_with("https://api.dicebear.com/8.x/initials/svg?seed="));
    assert!(avatar.contains("m.rossi"));
}

#[rocket::async_test]
async fn test_signup_duplicate_email_passes_provider_message_through() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");

    let first = client
        .post("/api/1/signup")
        .json(&json!({ "email": "dup@example.com", "password": "pw-one" }))
        .dispatch()
        .await;
    assert_eq!(first.status(), Status::Ok);

    let second = client
        .post("/api/1/signup")
        .json(&json!({ "email": "dup@example.com", "password": "pw-two" }))
        .dispatch()
        .await;
    assert_eq!(second.status(), Status::Conflict);
    let body: serde_json::Value = second.into_json().await.unwrap();
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[rocket::async_test]
async fn test_signup_requires_email_and_password() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");

    for payload in [
        json!({ "email": "", "password": "pw" }),
        json!({ "email": "x@example.com", "password": "   " }),
    ] {
        let response = client
            .post("/api/1/signup")
            .json(&payload)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
    }
}
