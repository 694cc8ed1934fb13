#[macro_use]
extern crate rocket;

use rocket::State;
use rocket::figment::value::Map;
use rocket::figment::{Figment, providers::{Env, Format, Toml}};
use rocket::fs::FileServer;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::status;
use rocket::serde::json::{Json, Value, json};
use rocket::{Build, Rocket};

pub mod admin_init_fairing;
pub mod api;
pub mod config;
pub mod logged_json;
pub mod models;
pub mod orm;
pub use orm::DbConn;
pub mod reference;
pub mod roster;
pub mod routing;
pub mod schema;
pub mod session_guards;

#[cfg(test)]
pub mod generate_types;

use config::{AppConfig, ConfigError};

#[catch(401)]
fn unauthorized(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Unauthorized",
        "path": req.uri().path().to_string(),
        "status": 401
    }))
}

#[catch(403)]
fn forbidden(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Forbidden",
        "path": req.uri().path().to_string(),
        "status": 403
    }))
}

#[catch(404)]
fn not_found(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Not Found",
        "path": req.uri().path().to_string(),
        "status": 404
    }))
}

#[catch(422)]
fn unprocessable_entity(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Unprocessable Entity",
        "path": req.uri().path().to_string(),
        "status": 422
    }))
}

#[catch(500)]
fn internal_server_error(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Internal Server Error",
        "path": req.uri().path().to_string(),
        "status": 500
    }))
}

#[catch(default)]
fn default_catcher(status: rocket::http::Status, req: &Request) -> Json<Value> {
    Json(json!({
        "error": status.reason().unwrap_or("Unknown Error"),
        "path": req.uri().path().to_string(),
        "status": status.code
    }))
}

pub fn mount_api_routes(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount("/api", api::routes())
}

/// Registers the JSON error catchers shared by the production and test
/// rockets.
pub fn register_error_catchers(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.register(
        "/",
        catchers![
            unauthorized,
            forbidden,
            not_found,
            unprocessable_entity,
            internal_server_error,
            default_catcher
        ],
    )
}

fn log_rocket_info(rocket: &Rocket<Build>) {
    let figment = rocket.figment();

    if let Ok(address) = figment.extract_inner::<String>("address") {
        info!("Rocket is running at: {}", address);
    }

    if let Ok(port) = figment.extract_inner::<u16>("port") {
        info!("Rocket is listening on port: {}", port);
    }

    match figment.extract_inner::<Map<String, Value>>("databases.cmms_db") {
        Ok(db_config) => {
            if let Some(Value::String(url)) = db_config.get("url") {
                info!("Database URL: {}", url);
            } else {
                warn!("Database URL not found in configuration");
            }
        }
        Err(e) => {
            warn!("Failed to extract database configuration: {}", e);
        }
    }
}

/// The configuration-required notice, managed by the setup rocket.
#[derive(Clone, Debug)]
pub struct SetupNotice {
    pub message: String,
}

fn setup_payload(message: &str) -> status::Custom<Json<Value>> {
    status::Custom(
        Status::ServiceUnavailable,
        Json(json!({
            "error": message,
            "configuration_required": true
        })),
    )
}

#[get("/<_..>")]
fn setup_notice_route(notice: &State<SetupNotice>) -> status::Custom<Json<Value>> {
    setup_payload(&notice.message)
}

#[catch(default)]
fn setup_notice_catcher(_status: Status, req: &Request) -> status::Custom<Json<Value>> {
    let message = req
        .rocket()
        .state::<SetupNotice>()
        .map(|n| n.message.clone())
        .unwrap_or_else(|| "Configuration required".to_string());
    setup_payload(&message)
}

/// The blocking configuration-required surface. No database fairing is
/// attached and no store call is ever made: every request answers 503 with
/// the configuration notice.
pub fn setup_error_rocket(error: ConfigError) -> Rocket<Build> {
    error!("Configuration error: {}", error);
    rocket::build()
        .manage(SetupNotice {
            message: error.to_string(),
        })
        .mount("/", routes![setup_notice_route])
        .register("/", catchers![setup_notice_catcher])
}

/// The fully configured application.
pub fn app_rocket(config: AppConfig) -> Rocket<Build> {
    let figment = Figment::from(rocket::Config::default())
        .merge(Toml::file("Rocket.toml").nested())
        .merge(Env::prefixed("ROCKET_").global())
        .merge(("databases.cmms_db.url", config.database_url.clone()));

    info!("Store API key: {}", config.masked_api_key());

    let rocket = rocket::custom(figment)
        .manage(config)
        .attach(DbConn::fairing())
        .attach(orm::set_foreign_keys_fairing())
        .attach(orm::run_migrations_fairing())
        .attach(admin_init_fairing::admin_init_fairing())
        .attach(reference::load_reference_fairing());
    let rocket = register_error_catchers(rocket);

    log_rocket_info(&rocket);

    let static_dir = std::env::var("CMMS_STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    mount_api_routes(rocket)
        .mount("/", FileServer::from(static_dir).rank(10))
        .mount("/", routing::routes())
}

/// Note that this function doesn't get tested by our tests. Tests set up
/// the in-memory rocket defined in orm::testing.
pub fn rocket() -> Rocket<Build> {
    match AppConfig::from_env() {
        Ok(config) => app_rocket(config),
        Err(error) => setup_error_rocket(error),
    }
}
