//! API endpoints for sign-in, sign-up and the current-session identity.
//!
//! These endpoints are the session store of the application: they delegate
//! to the auth layer in `orm::login` and surface its error messages to the
//! caller as strings. The session transition is binary - a caller is either
//! unauthenticated or holds a session cookie.

use rocket::http::{CookieJar, Status};
use rocket::response;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Route, get, post};
use ts_rs::TS;

use crate::DbConn;
use crate::models::Role;
use crate::orm::login::{
    avatar_url_for, display_name_from_email, find_account_by_email, process_login,
    sign_up_account,
};
use crate::orm::user::get_user_by_id;
use crate::session_guards::AuthenticatedUser;

/// Error response structure for authentication failures.
#[derive(Serialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

/// The identity payload returned by login, signup and the session getter.
#[derive(Serialize, TS)]
#[ts(export)]
pub struct SessionIdentity {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: String,
    pub roles: Vec<Role>,
}

/// Login request structure containing user credentials.
#[derive(Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sign-up request: credentials only; the display name is derived from the
/// email local-part.
#[derive(Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

async fn identity_for_account(
    db: &DbConn,
    account: crate::models::AuthAccount,
) -> Result<SessionIdentity, response::status::Custom<Json<ErrorResponse>>> {
    let profile_id = account.id.clone();
    let profile = db
        .run(move |conn| get_user_by_id(conn, &profile_id))
        .await
        .map_err(|e| {
            let err = Json(ErrorResponse { error: e.to_string() });
            response::status::Custom(Status::InternalServerError, err)
        })?;

    match profile {
        Some(user) => Ok(SessionIdentity {
            user_id: user.id,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            roles: user.roles,
        }),
        None => {
            // Identity without a profile row: privilege-less.
            let err = Json(ErrorResponse {
                error: "No profile exists for this identity".to_string(),
            });
            Err(response::status::Custom(Status::Unauthorized, err))
        }
    }
}

/// Login endpoint.
///
/// - **URL:** `/api/1/login`
/// - **Method:** `POST`
/// - **Purpose:** Authenticates by email and password and sets the session cookie
/// - **Authentication:** None required
///
/// Invalid credentials return a generic message to prevent account
/// enumeration; empty fields are a 400.
#[post("/1/login", data = "<login>")]
pub async fn login(
    db: DbConn,
    cookies: &CookieJar<'_>,
    login: Json<LoginRequest>,
) -> Result<Json<SessionIdentity>, response::status::Custom<Json<ErrorResponse>>> {
    match process_login(&db, cookies, &login).await {
        Ok(account) => identity_for_account(&db, account).await.map(Json),
        Err(status) => {
            let message = if status == Status::BadRequest {
                "Email and password are required"
            } else {
                "Invalid credentials"
            };
            let err_json = Json(ErrorResponse {
                error: message.to_string(),
            });
            Err(response::status::Custom(status, err_json))
        }
    }
}

/// Sign-up endpoint.
///
/// - **URL:** `/api/1/signup`
/// - **Method:** `POST`
/// - **Purpose:** Creates an auth identity plus its base profile and signs it in
/// - **Authentication:** None required
///
/// The display name is the email local-part; the avatar URL is derived from
/// the URL-encoded name. Provider errors pass through verbatim.
#[post("/1/signup", data = "<signup>")]
pub async fn signup(
    db: DbConn,
    cookies: &CookieJar<'_>,
    signup: Json<SignupRequest>,
) -> Result<Json<SessionIdentity>, response::status::Custom<Json<ErrorResponse>>> {
    if signup.email.trim().is_empty() || signup.password.trim().is_empty() {
        let err = Json(ErrorResponse {
            error: "Email and password are required".to_string(),
        });
        return Err(response::status::Custom(Status::BadRequest, err));
    }

    let request = signup.into_inner();
    let email = request.email.clone();
    let created = db
        .run(move |conn| {
            let name = display_name_from_email(&request.email);
            let avatar = avatar_url_for(&name);
            sign_up_account(conn, &request.email, &request.password, &name, &avatar)
        })
        .await;

    let account = match created {
        Ok(account) => account,
        Err(e) => {
            let err = Json(ErrorResponse { error: e.to_string() });
            return Err(response::status::Custom(Status::Conflict, err));
        }
    };

    // Sign the fresh identity in: binary transition to authenticated.
    let session_token = crate::orm::login::create_and_store_session(&db, &account.id)
        .await
        .map_err(|status| {
            let err = Json(ErrorResponse {
                error: "Failed to create session".to_string(),
            });
            response::status::Custom(status, err)
        })?;
    crate::orm::login::set_session_cookie(cookies, &session_token);

    // Double-check the identity is usable before reporting success.
    match find_account_by_email(&db, &email).await {
        Ok(Some(account)) => identity_for_account(&db, account).await.map(Json),
        _ => {
            let err = Json(ErrorResponse {
                error: "Sign-up returned no usable identity".to_string(),
            });
            Err(response::status::Custom(Status::InternalServerError, err))
        }
    }
}

/// Current-session endpoint.
///
/// - **URL:** `/api/1/session`
/// - **Method:** `GET`
/// - **Purpose:** Returns the identity behind the session cookie
/// - **Authentication:** Required
#[get("/1/session")]
pub async fn current_session(
    auth_user: AuthenticatedUser,
) -> Json<SessionIdentity> {
    let user = auth_user.user;
    Json(SessionIdentity {
        user_id: user.id,
        email: user.email,
        name: user.name,
        avatar_url: user.avatar_url,
        roles: user.roles,
    })
}

pub fn routes() -> Vec<Route> {
    routes![login, signup, current_session]
}
