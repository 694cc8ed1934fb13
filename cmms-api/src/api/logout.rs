//! API endpoint for logout and session termination.

use rocket::http::CookieJar;
use rocket::serde::json::{Json, Value, json};
use rocket::{Route, post};

use crate::DbConn;
use crate::orm::logout::revoke_session;

/// Logout endpoint.
///
/// - **URL:** `/api/1/logout`
/// - **Method:** `POST`
/// - **Purpose:** Revokes the current session and clears the cookie
/// - **Authentication:** Not enforced - logging out an already-dead session
///   is a no-op, not an error
#[post("/1/logout")]
pub async fn logout(db: DbConn, cookies: &CookieJar<'_>) -> Json<Value> {
    if let Some(cookie) = cookies.get("session") {
        let session_id = cookie.value().to_string();
        if let Err(e) = revoke_session(&db, &session_id).await {
            error!("Failed to revoke session: {:?}", e);
        }
        cookies.remove("session");
    }

    Json(json!({ "message": "Logged out" }))
}

pub fn routes() -> Vec<Route> {
    routes![logout]
}
