//! API endpoints for managing sites.
//!
//! Sites belong to companies, so site creation has an ordering dependency:
//! at least one company must exist first. Site creation is the second of
//! the two write paths that trigger a reference-data reload.

use rocket::Route;
use rocket::State;
use rocket::http::Status;
use rocket::response::{self, status};
use rocket::serde::json::Json;
use serde::Serialize;
use ts_rs::TS;

use crate::logged_json::LoggedJson;
use crate::models::{Site, SiteInput};
use crate::orm::DbConn;
use crate::orm::company::{count_companies, get_company_by_id};
use crate::orm::site::{get_all_sites, get_site_by_id, insert_site};
use crate::reference::ReferenceData;
use crate::session_guards::AuthenticatedUser;

/// Error response structure for site API failures.
#[derive(Serialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create Site endpoint.
///
/// - **URL:** `/api/1/sites`
/// - **Method:** `POST`
/// - **Purpose:** Creates a new site under a company
/// - **Authentication:** Required
///
/// Rejected when the name is blank, when no company exists yet, or when the
/// referenced company is unknown. On success the reference-data cache is
/// reloaded before responding.
#[post("/1/sites", data = "<new_site>")]
pub async fn create_site(
    db: DbConn,
    users_db: DbConn,
    companies_db: DbConn,
    sites_db: DbConn,
    reference: &State<ReferenceData>,
    new_site: LoggedJson<SiteInput>,
    _auth_user: AuthenticatedUser,
) -> Result<status::Created<Json<Site>>, response::status::Custom<Json<ErrorResponse>>> {
    if new_site.name.trim().is_empty() {
        let err = Json(ErrorResponse {
            error: "Site name must not be empty".to_string(),
        });
        return Err(response::status::Custom(Status::BadRequest, err));
    }

    let created = db
        .run(move |conn| {
            match count_companies(conn) {
                Ok(0) => {
                    let err = Json(ErrorResponse {
                        error: "No companies exist yet; create a company first".to_string(),
                    });
                    return Err(response::status::Custom(Status::Conflict, err));
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error counting companies: {:?}", e);
                    let err = Json(ErrorResponse {
                        error: "Database error while validating companies".to_string(),
                    });
                    return Err(response::status::Custom(Status::InternalServerError, err));
                }
            }

            match get_company_by_id(conn, new_site.company_id) {
                Ok(Some(_)) => insert_site(conn, new_site.name.clone(), new_site.company_id)
                    .map_err(|e| {
                        eprintln!("Error creating site: {:?}", e);
                        let err = Json(ErrorResponse {
                            error: "Internal server error while creating site".to_string(),
                        });
                        response::status::Custom(Status::InternalServerError, err)
                    }),
                Ok(None) => {
                    let err = Json(ErrorResponse {
                        error: format!("Company with ID {} does not exist", new_site.company_id),
                    });
                    Err(response::status::Custom(Status::BadRequest, err))
                }
                Err(e) => {
                    eprintln!("Error validating company for site creation: {:?}", e);
                    let err = Json(ErrorResponse {
                        error: "Internal server error while validating company".to_string(),
                    });
                    Err(response::status::Custom(Status::InternalServerError, err))
                }
            }
        })
        .await?;

    reference.reload(users_db, companies_db, sites_db).await;

    Ok(status::Created::new("/").body(Json(created)))
}

/// List Sites endpoint.
///
/// - **URL:** `/api/1/sites`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves all sites ordered by id
/// - **Authentication:** Required
#[get("/1/sites")]
pub async fn list_sites(
    db: DbConn,
    _auth_user: AuthenticatedUser,
) -> Result<Json<Vec<Site>>, Status> {
    db.run(|conn| {
        get_all_sites(conn).map(Json).map_err(|e| {
            eprintln!("Error listing sites: {:?}", e);
            Status::InternalServerError
        })
    })
    .await
}

/// Get Site endpoint.
///
/// - **URL:** `/api/1/sites/<site_id>`
/// - **Method:** `GET`
/// - **Authentication:** Required
#[get("/1/sites/<site_id>")]
pub async fn get_site(
    db: DbConn,
    site_id: i32,
    _auth_user: AuthenticatedUser,
) -> Result<Json<Site>, Status> {
    db.run(move |conn| match get_site_by_id(conn, site_id) {
        Ok(Some(site)) => Ok(Json(site)),
        Ok(None) => Err(Status::NotFound),
        Err(e) => {
            eprintln!("Error getting site: {:?}", e);
            Err(Status::InternalServerError)
        }
    })
    .await
}

pub fn routes() -> Vec<Route> {
    routes![create_site, list_sites, get_site]
}
