//! API endpoints for managing companies.
//!
//! Companies are the top of the settings hierarchy: sites belong to them.
//! Company creation is one of the two write paths that trigger a
//! reference-data reload.

use rocket::Route;
use rocket::State;
use rocket::http::Status;
use rocket::response::{self, status};
use rocket::serde::json::Json;
use serde::Serialize;
use ts_rs::TS;

use crate::logged_json::LoggedJson;
use crate::models::{Company, CompanyInput};
use crate::orm::DbConn;
use crate::orm::company::{get_all_companies, get_company_by_name_case_insensitive, insert_company};
use crate::reference::ReferenceData;
use crate::session_guards::AuthenticatedUser;

/// Error response structure for company API failures.
#[derive(Serialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create Company endpoint.
///
/// - **URL:** `/api/1/companies`
/// - **Method:** `POST`
/// - **Purpose:** Creates a new company
/// - **Authentication:** Required
///
/// Blank names are rejected; duplicate names (case-insensitive) are a 409.
/// On success the reference-data cache is reloaded before responding.
#[post("/1/companies", data = "<new_company>")]
pub async fn create_company(
    db: DbConn,
    users_db: DbConn,
    companies_db: DbConn,
    sites_db: DbConn,
    reference: &State<ReferenceData>,
    new_company: LoggedJson<CompanyInput>,
    _auth_user: AuthenticatedUser,
) -> Result<status::Created<Json<Company>>, response::status::Custom<Json<ErrorResponse>>> {
    if new_company.name.trim().is_empty() {
        let err = Json(ErrorResponse {
            error: "Company name must not be empty".to_string(),
        });
        return Err(response::status::Custom(Status::BadRequest, err));
    }

    let created = db
        .run(move |conn| {
            match get_company_by_name_case_insensitive(conn, &new_company.name) {
                Ok(Some(_existing)) => {
                    let err = Json(ErrorResponse {
                        error: format!("Company with name '{}' already exists", new_company.name),
                    });
                    return Err(response::status::Custom(Status::Conflict, err));
                }
                Ok(None) => {}
                Err(e) => {
                    eprintln!("Error checking for existing company: {:?}", e);
                    let err = Json(ErrorResponse {
                        error: "Database error while checking for existing company".to_string(),
                    });
                    return Err(response::status::Custom(Status::InternalServerError, err));
                }
            }

            insert_company(conn, new_company.name.clone()).map_err(|e| {
                eprintln!("Error creating company: {:?}", e);
                let err = Json(ErrorResponse {
                    error: "Database error while creating company".to_string(),
                });
                response::status::Custom(Status::InternalServerError, err)
            })
        })
        .await?;

    // Settings writes are the only paths that reload the reference cache.
    reference.reload(users_db, companies_db, sites_db).await;

    Ok(status::Created::new("/").body(Json(created)))
}

/// List Companies endpoint.
///
/// - **URL:** `/api/1/companies`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves all companies ordered by id
/// - **Authentication:** Required
#[get("/1/companies")]
pub async fn list_companies(
    db: DbConn,
    _auth_user: AuthenticatedUser,
) -> Result<Json<Vec<Company>>, Status> {
    db.run(|conn| {
        get_all_companies(conn).map(Json).map_err(|e| {
            eprintln!("Error listing companies: {:?}", e);
            Status::InternalServerError
        })
    })
    .await
}

pub fn routes() -> Vec<Route> {
    routes![create_company, list_companies]
}
