//! API endpoints for the user directory.
//!
//! Listing is open to any authenticated caller; creating users is
//! admin-gated and runs the composite two-step operation: an auth identity
//! is signed up first, then the profile row is patched with the submitted
//! role set. The two steps have no atomicity across them - a profile
//! failure leaves the auth identity behind, and the error surface says
//! which step failed.

use rocket::Route;
use rocket::http::Status;
use rocket::response::{self, status};
use rocket::serde::json::Json;
use serde::Serialize;
use ts_rs::TS;

use crate::logged_json::LoggedJson;
use crate::models::{User, UserInput};
use crate::orm::DbConn;
use crate::orm::provision::{ProvisionError, provision_user};
use crate::orm::user::list_all_users;
use crate::session_guards::{AdminUser, AuthenticatedUser};

/// Error response structure for user API failures.
#[derive(Serialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

/// List Users endpoint.
///
/// - **URL:** `/api/1/users`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves all profiles with their role sets
/// - **Authentication:** Required
#[get("/1/users")]
pub async fn list_users(
    db: DbConn,
    _auth_user: AuthenticatedUser,
) -> Result<Json<Vec<User>>, Status> {
    db.run(|conn| {
        list_all_users(conn).map(Json).map_err(|e| {
            eprintln!("Error listing users: {:?}", e);
            Status::InternalServerError
        })
    })
    .await
}

/// Create User endpoint - the composite write.
///
/// - **URL:** `/api/1/users`
/// - **Method:** `POST`
/// - **Purpose:** Signs up an auth identity, then patches its profile roles
/// - **Authentication:** Required, Admin role
///
/// # Request Format
///
/// ```json
/// {
///   "name": "Marco Rossi",
///   "email": "m.rossi@example.com",
///   "roles": ["Periodic Maintenance Manager"]
/// }
/// ```
///
/// # Failure modes
///
/// * `400` - blank name/email or an empty role set
/// * `409` with `Auth Error: …` - the identity step failed; nothing created
/// * `500` with `Profile Error: …` - the role update failed **after** the
///   identity was created; the orphaned identity stays behind (cleaning it
///   up needs privileges this service does not hold)
#[post("/1/users", data = "<new_user>")]
pub async fn create_user(
    db: DbConn,
    new_user: LoggedJson<UserInput>,
    _admin: AdminUser,
) -> Result<status::Created<Json<User>>, response::status::Custom<Json<ErrorResponse>>> {
    if new_user.name.trim().is_empty() || new_user.email.trim().is_empty() {
        let err = Json(ErrorResponse {
            error: "Name and email are required".to_string(),
        });
        return Err(response::status::Custom(Status::BadRequest, err));
    }
    if new_user.roles.is_empty() {
        let err = Json(ErrorResponse {
            error: "At least one role must be provided".to_string(),
        });
        return Err(response::status::Custom(Status::BadRequest, err));
    }

    let input = new_user.into_inner();
    db.run(move |conn| {
        provision_user(conn, &input.name, &input.email, &input.roles)
            .map(|created| status::Created::new("/").body(Json(created)))
            .map_err(|e| {
                let code = match &e {
                    ProvisionError::Auth(_) => Status::Conflict,
                    ProvisionError::Profile(_) => Status::InternalServerError,
                };
                let err = Json(ErrorResponse {
                    error: e.to_string(),
                });
                response::status::Custom(code, err)
            })
    })
    .await
}

pub fn routes() -> Vec<Route> {
    routes![list_users, create_user]
}
