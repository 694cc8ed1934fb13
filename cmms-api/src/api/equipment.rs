//! API endpoints for the equipment register.
//!
//! Equipment has a single ownership point: every read goes to the store,
//! and nothing here touches the reference-data cache. The list is returned
//! in name order with an optional case-insensitive search over name, code
//! and category.

use rocket::Route;
use rocket::http::Status;
use rocket::response::{self, status};
use rocket::serde::json::Json;
use serde::Serialize;
use ts_rs::TS;

use crate::logged_json::LoggedJson;
use crate::models::{
    EQUIPMENT_CATEGORIES, Equipment, EquipmentInput, EquipmentStatus, Site,
};
use crate::orm::DbConn;
use crate::orm::equipment::{
    filter_equipment, get_equipment_by_id, insert_equipment, list_all_equipment,
};
use crate::orm::site::{get_all_sites, get_site_by_id};
use crate::session_guards::AuthenticatedUser;

/// Error response structure for equipment API failures.
#[derive(Serialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

/// The option set the creation form is built from, defaults included.
#[derive(Serialize, TS)]
#[ts(export)]
pub struct EquipmentOptions {
    pub categories: Vec<String>,
    pub statuses: Vec<EquipmentStatus>,
    pub sites: Vec<Site>,
    pub default_site_id: Option<i32>,
    pub default_category: String,
    pub default_status: EquipmentStatus,
}

/// List Equipment endpoint.
///
/// - **URL:** `/api/1/equipment?search=<term>`
/// - **Method:** `GET`
/// - **Purpose:** All equipment in name order, optionally filtered
/// - **Authentication:** Required
///
/// The filter is a case-insensitive substring match over name, code and
/// category; an empty term returns the full list.
#[get("/1/equipment?<search>")]
pub async fn list_equipment(
    db: DbConn,
    search: Option<String>,
    _auth_user: AuthenticatedUser,
) -> Result<Json<Vec<Equipment>>, Status> {
    let list = db
        .run(|conn| {
            list_all_equipment(conn).map_err(|e| {
                eprintln!("Error listing equipment: {:?}", e);
                Status::InternalServerError
            })
        })
        .await?;

    let term = search.unwrap_or_default();
    Ok(Json(filter_equipment(list, &term)))
}

/// Equipment creation options endpoint.
///
/// - **URL:** `/api/1/equipment/options`
/// - **Method:** `GET`
/// - **Purpose:** Categories, statuses, sites and form defaults
/// - **Authentication:** Required
///
/// Defaults mirror the creation form: first site, first category,
/// Operational status.
#[get("/1/equipment/options")]
pub async fn equipment_options(
    db: DbConn,
    _auth_user: AuthenticatedUser,
) -> Result<Json<EquipmentOptions>, Status> {
    let sites = db
        .run(|conn| {
            get_all_sites(conn).map_err(|e| {
                eprintln!("Error listing sites for equipment options: {:?}", e);
                Status::InternalServerError
            })
        })
        .await?;

    Ok(Json(EquipmentOptions {
        categories: EQUIPMENT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        statuses: EquipmentStatus::ALL.to_vec(),
        default_site_id: sites.first().map(|s| s.id),
        sites,
        default_category: EQUIPMENT_CATEGORIES[0].to_string(),
        default_status: EquipmentStatus::Operational,
    }))
}

/// Create Equipment endpoint.
///
/// - **URL:** `/api/1/equipment`
/// - **Method:** `POST`
/// - **Purpose:** Creates a new equipment record
/// - **Authentication:** Required
///
/// Validation is limited to required fields being present - no numeric or
/// uniqueness checks. The site must exist. The new record starts without a
/// `last_maintenance` date and the reference cache is not reloaded.
#[post("/1/equipment", data = "<new_equipment>")]
pub async fn create_equipment(
    db: DbConn,
    new_equipment: LoggedJson<EquipmentInput>,
    _auth_user: AuthenticatedUser,
) -> Result<status::Created<Json<Equipment>>, response::status::Custom<Json<ErrorResponse>>> {
    let input = new_equipment.into_inner();
    if input.name.trim().is_empty()
        || input.location.trim().is_empty()
        || input.category.trim().is_empty()
    {
        let err = Json(ErrorResponse {
            error: "All fields are required".to_string(),
        });
        return Err(response::status::Custom(Status::BadRequest, err));
    }

    db.run(move |conn| {
        match get_site_by_id(conn, input.site_id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                let err = Json(ErrorResponse {
                    error: format!("Site with ID {} does not exist", input.site_id),
                });
                return Err(response::status::Custom(Status::BadRequest, err));
            }
            Err(e) => {
                eprintln!("Error validating site for equipment creation: {:?}", e);
                let err = Json(ErrorResponse {
                    error: "Internal server error while validating site".to_string(),
                });
                return Err(response::status::Custom(Status::InternalServerError, err));
            }
        }

        insert_equipment(conn, input)
            .map(|created| status::Created::new("/").body(Json(created)))
            .map_err(|e| {
                eprintln!("Error creating equipment: {:?}", e);
                let err = Json(ErrorResponse {
                    error: "Internal server error while creating equipment".to_string(),
                });
                response::status::Custom(Status::InternalServerError, err)
            })
    })
    .await
}

/// Get Equipment endpoint.
///
/// - **URL:** `/api/1/equipment/<equipment_id>`
/// - **Method:** `GET`
/// - **Purpose:** Retrieves a single equipment record by its string code
/// - **Authentication:** Required
///
/// A missing id is a plain 404 - the detail view renders its not-found
/// placeholder from it.
#[get("/1/equipment/<equipment_id>", rank = 2)]
pub async fn get_equipment(
    db: DbConn,
    equipment_id: String,
    _auth_user: AuthenticatedUser,
) -> Result<Json<Equipment>, Status> {
    db.run(move |conn| match get_equipment_by_id(conn, &equipment_id) {
        Ok(Some(item)) => Ok(Json(item)),
        Ok(None) => Err(Status::NotFound),
        Err(e) => {
            eprintln!("Error getting equipment: {:?}", e);
            Err(Status::InternalServerError)
        }
    })
    .await
}

pub fn routes() -> Vec<Route> {
    routes![
        list_equipment,
        equipment_options,
        create_equipment,
        get_equipment
    ]
}
