//! Session-based authentication and authorization guards for Rocket routes.
//!
//! Guards validate the session cookie, resolve the auth account and its
//! profile row, and enforce role-based access where a route demands it.
//!
//! ```rust
//! use rocket::get;
//! use cmms_api::session_guards::AuthenticatedUser;
//!
//! #[get("/profile")]
//! fn get_profile(user: AuthenticatedUser) -> String {
//!     format!("Welcome, {}! Roles: {:?}", user.user.name, user.user.roles)
//! }
//! ```

use chrono::Utc;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};

use crate::DbConn;
use crate::models::{AuthAccount, Role, Session, User};
use crate::orm::user::get_user_by_id;
use crate::schema::{auth_accounts, sessions};

/// A request guard for routes that require an authenticated user.
///
/// Validation steps:
/// 1. Extract the `session` cookie
/// 2. Find a non-revoked, non-expired session row for it
/// 3. Resolve the auth account the session belongs to
/// 4. Resolve the profile row for that identity
/// 5. Require a non-empty role set - an orphaned identity with no profile
///    (or an empty role set) is privilege-less and gets 401
#[derive(Debug)]
pub struct AuthenticatedUser {
    /// The authentication identity behind the session
    pub account: AuthAccount,
    /// The profile row, carrying the role set
    pub user: User,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let cookies = request.cookies();
        let db = match request.guard::<DbConn>().await {
            Outcome::Success(db) => db,
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };

        let session_cookie = match cookies.get("session") {
            Some(cookie) => cookie,
            None => return Outcome::Error((Status::Unauthorized, ())),
        };

        let session_id = session_cookie.value().to_string();

        let session_result = db
            .run(move |conn| {
                sessions::table
                    .filter(sessions::id.eq(&session_id))
                    .filter(sessions::revoked.eq(false))
                    .filter(
                        sessions::expires_at
                            .is_null()
                            .or(sessions::expires_at.gt(Utc::now().naive_utc())),
                    )
                    .first::<Session>(conn)
                    .optional()
            })
            .await;

        let session = match session_result {
            Ok(Some(sess)) => sess,
            Ok(None) => return Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                error!("Database error finding session: {:?}", e);
                return Outcome::Error((Status::Unauthorized, ()));
            }
        };

        let account_id = session.account_id.clone();
        let account_result = db
            .run(move |conn| {
                auth_accounts::table
                    .filter(auth_accounts::id.eq(&account_id))
                    .first::<AuthAccount>(conn)
                    .optional()
            })
            .await;

        let account = match account_result {
            Ok(Some(a)) => a,
            Ok(None) => return Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                error!("Database error finding auth account: {:?}", e);
                return Outcome::Error((Status::Unauthorized, ()));
            }
        };

        let profile_id = account.id.clone();
        let user_result = db.run(move |conn| get_user_by_id(conn, &profile_id)).await;

        let user = match user_result {
            Ok(Some(u)) => {
                if u.roles.is_empty() {
                    return Outcome::Error((Status::Unauthorized, ()));
                }
                u
            }
            Ok(None) => return Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                error!("Database error finding profile: {:?}", e);
                return Outcome::Error((Status::Unauthorized, ()));
            }
        };

        Outcome::Success(AuthenticatedUser { account, user })
    }
}

impl AuthenticatedUser {
    /// Helper method to check if the user holds a specific role
    pub fn has_role(&self, role: Role) -> bool {
        self.user.roles.contains(&role)
    }

    /// Helper method to check if the user holds any of the specified roles
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.user.roles.contains(role))
    }

    /// Helper method to check if the user holds all of the specified roles
    pub fn has_all_roles(&self, roles: &[Role]) -> bool {
        roles.iter().all(|role| self.user.roles.contains(role))
    }
}

/// Macro to create role-specific request guards
macro_rules! create_role_guard {
    ($name:ident, $role:expr) => {
        #[derive(Debug)]
        pub struct $name {
            pub account: AuthAccount,
            pub user: User,
        }

        #[rocket::async_trait]
        impl<'r> FromRequest<'r> for $name {
            type Error = ();

            async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
                let auth_user = match AuthenticatedUser::from_request(request).await {
                    Outcome::Success(user) => user,
                    Outcome::Error(e) => return Outcome::Error(e),
                    Outcome::Forward(f) => return Outcome::Forward(f),
                };

                if auth_user.has_role($role) {
                    Outcome::Success($name {
                        account: auth_user.account,
                        user: auth_user.user,
                    })
                } else {
                    Outcome::Error((Status::Forbidden, ()))
                }
            }
        }
    };
}

// A request guard that requires the "Admin" role on top of authentication.
create_role_guard!(AdminUser, Role::Admin);
