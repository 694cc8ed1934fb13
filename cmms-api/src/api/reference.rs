//! API endpoints for the reference-data cache.

use rocket::Route;
use rocket::State;
use rocket::serde::json::Json;

use crate::orm::DbConn;
use crate::reference::{ReferenceData, ReferenceSnapshot};
use crate::session_guards::AuthenticatedUser;

/// Reference snapshot endpoint.
///
/// - **URL:** `/api/1/reference`
/// - **Method:** `GET`
/// - **Purpose:** The current users/companies/sites snapshot
/// - **Authentication:** Required
///
/// The snapshot's `error` field carries the single error string of the last
/// load, with whatever data the load still managed to fetch.
#[get("/1/reference")]
pub async fn get_reference(
    reference: &State<ReferenceData>,
    _auth_user: AuthenticatedUser,
) -> Json<ReferenceSnapshot> {
    Json(reference.snapshot())
}

/// Reference reload endpoint.
///
/// - **URL:** `/api/1/reference/reload`
/// - **Method:** `POST`
/// - **Purpose:** Re-runs the three list-fetches and swaps the snapshot
/// - **Authentication:** Required
///
/// Reloads do not cancel one another; concurrent calls race and the last
/// write wins.
#[post("/1/reference/reload")]
pub async fn reload_reference(
    users_db: DbConn,
    companies_db: DbConn,
    sites_db: DbConn,
    reference: &State<ReferenceData>,
    _auth_user: AuthenticatedUser,
) -> Json<ReferenceSnapshot> {
    reference.reload(users_db, companies_db, sites_db).await;
    Json(reference.snapshot())
}

pub fn routes() -> Vec<Route> {
    routes![get_reference, reload_reference]
}
