//! The composite create-user operation: auth sign-up followed by a profile
//! role update. The two steps span the auth and profile subsystems with no
//! atomicity across them.

use std::fmt;

use diesel::prelude::*;
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::models::{Role, User};
use crate::orm::login::{avatar_url_for, sign_up_account};
use crate::orm::user::update_user_roles;
use crate::schema::auth_accounts;

/// Failure surface of the composite operation. The message carries the
/// underlying provider/database error verbatim.
#[derive(Debug)]
pub enum ProvisionError {
    Auth(String),
    Profile(String),
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionError::Auth(msg) => write!(f, "Auth Error: {msg}"),
            ProvisionError::Profile(msg) => write!(f, "Profile Error: {msg}"),
        }
    }
}

impl std::error::Error for ProvisionError {}

/// Generates the temporary password handed to new identities. In production
/// this would be replaced by an invitation flow.
pub fn temp_password() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(12)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("password-{suffix}")
}

/// Creates a full user: auth identity first, then the profile role set.
///
/// Strictly ordered, no compensating transaction:
/// 1. Sign up the auth identity with a generated temporary password and the
///    derived avatar URL as identity metadata. The sign-up path also creates
///    the base profile row for the identity.
/// 2. Update that profile row with the submitted role set and return it.
///
/// If step 2 fails, the auth identity from step 1 stays behind as an
/// orphaned, privilege-less account. Cleaning it up would need elevated
/// privileges this caller does not hold, so the failure is surfaced as a
/// `Profile Error` and nothing is rolled back.
pub fn provision_user(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    roles: &[Role],
) -> Result<User, ProvisionError> {
    let password = temp_password();
    let avatar_url = avatar_url_for(name);

    sign_up_account(conn, email, &password, name, &avatar_url)
        .map_err(|e| ProvisionError::Auth(e.to_string()))?;

    let account = auth_accounts::table
        .filter(auth_accounts::email.eq(email))
        .first::<crate::models::AuthAccount>(conn)
        .optional()
        .map_err(|e| ProvisionError::Auth(e.to_string()))?
        .ok_or_else(|| ProvisionError::Auth("sign-up returned no usable identity".to_string()))?;

    update_user_roles(conn, &account.id, roles)
        .map_err(|e| ProvisionError::Profile(e.to_string()))
}
