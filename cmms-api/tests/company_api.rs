use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::json;

use cmms_api::models::Company;
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
async fn test_company_endpoints_require_authentication() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");

    let response = client.get("/api/1/companies").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);

    let response = client
        .post("/api/1/companies")
        .json(&json!({ "name": "Acme Manufacturing" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[rocket::async_test]
async fn test_create_and_list_companies() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin_cookie = login_admin(&client).await;

    let response = client
        .post("/api/1/companies")
        .cookie(admin_cookie.clone())
        .json(&json!({ "name": "Acme Manufacturing" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
    let created: Company = response.into_json().await.expect("valid company JSON");
    assert_eq!(created.name, "Acme Manufacturing");
    assert!(created.id > 0);

    let response = client
        .get("/api/1/companies")
        .cookie(admin_cookie)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let companies: Vec<Company> = response.into_json().await.unwrap();
    assert!(companies.iter().any(|c| c.name == "Acme Manufacturing"));
}

#[rocket::async_test]
async fn test_duplicate_company_name_is_a_conflict() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin_cookie = login_admin(&client).await;

    let response = client
        .post("/api/1/companies")
        .cookie(admin_cookie.clone())
        .json(&json!({ "name": "Acme Manufacturing" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);

    let response = client
        .post("/api/1/companies")
        .cookie(admin_cookie)
        .json(&json!({ "name": "ACME manufacturing" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Conflict);
    let body: serde_json::Value = response.into_json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[rocket::async_test]
async fn test_blank_company_name_is_rejected() {
    let client = Client::tracked(test_rocket())
        .await
        .expect("valid rocket instance");
    let admin_cookie = login_admin(&client).await;

    let response = client
        .post("/api/1/companies")
        .cookie(admin_cookie)
        .json(&json!({ "name": "   " }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}
