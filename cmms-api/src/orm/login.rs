//! Database operations for authentication and session management.
//!
//! This module is the auth-provider surface of the application: sign-in,
//! sign-up, password hashing and session storage. Error messages from this
//! layer are passed through to callers verbatim.

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use diesel::prelude::*;
use rocket::http::{Cookie, CookieJar, RawStr, SameSite, Status};
use uuid::Uuid;

use crate::DbConn;
use crate::models::{AuthAccount, NewAuthAccount, NewSession, Role};
use crate::orm::user::insert_profile;
use crate::schema::{auth_accounts, sessions};

/// Trait for abstracting database operations to support both production and
/// testing. The same login functions work with `DbConn` (production) and the
/// test wrapper in `orm::testing`.
pub trait DbRunner {
    fn run<F, R>(&self, f: F) -> impl std::future::Future<Output = R>
    where
        F: FnOnce(&mut diesel::SqliteConnection) -> R + Send + 'static,
        R: Send + 'static;
}

impl DbRunner for DbConn {
    fn run<F, R>(&self, f: F) -> impl std::future::Future<Output = R>
    where
        F: FnOnce(&mut diesel::SqliteConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        DbConn::run(self, f)
    }
}

/// Generates a new UUID-based session token.
fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// Derives the default display name from an email's local part.
pub fn display_name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// Deterministic identicon avatar URL, keyed by the URL-encoded name.
pub fn avatar_url_for(name: &str) -> String {
    let seed = RawStr::new(name).percent_encode();
    format!(
        "https://api.dicebear.com/8.x/initials/svg?seed={}",
        seed.as_str()
    )
}

/// Finds an auth account by its email address.
pub async fn find_account_by_email<D: DbRunner>(
    db: &D,
    email: &str,
) -> Result<Option<AuthAccount>, Status> {
    let email = email.to_owned();
    db.run(move |conn| {
        auth_accounts::table
            .filter(auth_accounts::email.eq(email))
            .first::<AuthAccount>(conn)
            .optional()
    })
    .await
    .map_err(|_| Status::InternalServerError)
}

/// Verifies a password against a stored Argon2 hash. Returns `false` for
/// non-matching passwords or malformed hashes.
fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Hashes a password using Argon2 with a random salt.
pub fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .expect("Hashing should succeed")
        .to_string()
}

/// Creates a new session row for an account and returns the token.
pub async fn create_and_store_session<D: DbRunner>(
    db: &D,
    account_id: &str,
) -> Result<String, Status> {
    let session_token = generate_session_token();
    let now = Utc::now().naive_utc();

    let new_session = NewSession {
        id: session_token.clone(),
        account_id: account_id.to_string(),
        created_at: now,
        expires_at: None,
        revoked: false,
    };

    db.run(move |conn| {
        diesel::insert_into(sessions::table)
            .values(&new_session)
            .execute(conn)
    })
    .await
    .map_err(|_| Status::InternalServerError)?;

    Ok(session_token)
}

/// Sets the session cookie: HTTP-only, SameSite=Lax, secure outside tests.
pub fn set_session_cookie(cookies: &CookieJar<'_>, session_token: &str) {
    let secure_flag = !cfg!(test);
    let cookie = Cookie::build(("session", session_token.to_string()))
        .http_only(true)
        .secure(secure_flag)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    cookies.add(cookie);
}

/// Processes a complete login: validates input, verifies the password,
/// creates a session and sets the cookie.
///
/// # Returns
/// * `Ok(AuthAccount)` - login succeeded, session cookie set
/// * `Err(Status::BadRequest)` - empty email or password
/// * `Err(Status::Unauthorized)` - unknown account or wrong password
/// * `Err(Status::InternalServerError)` - database failure
pub async fn process_login<D: DbRunner>(
    db: &D,
    cookies: &CookieJar<'_>,
    login: &crate::api::login::LoginRequest,
) -> Result<AuthAccount, Status> {
    if login.email.trim().is_empty() || login.password.trim().is_empty() {
        return Err(Status::BadRequest);
    }

    let account = match find_account_by_email(db, &login.email).await? {
        Some(account) => account,
        None => return Err(Status::Unauthorized),
    };

    if !verify_password(&login.password, &account.password_hash) {
        return Err(Status::Unauthorized);
    }

    let session_token = create_and_store_session(db, &account.id).await?;
    set_session_cookie(cookies, &session_token);

    Ok(account)
}

/// Creates an auth identity and - in place of the hosted store's
/// `handle_new_user` trigger - the base profile row for it, carrying the
/// default `Requester` role so the non-empty-roles invariant holds.
pub fn sign_up_account(
    conn: &mut SqliteConnection,
    account_email: &str,
    password: &str,
    display_name: &str,
    avatar_url: &str,
) -> Result<AuthAccount, diesel::result::Error> {
    let account_id = Uuid::new_v4().to_string();
    let now = Utc::now().naive_utc();

    let new_account = NewAuthAccount {
        id: account_id.clone(),
        email: account_email.to_string(),
        password_hash: hash_password(password),
        display_name: display_name.to_string(),
        avatar_url: avatar_url.to_string(),
        created_at: now,
    };

    diesel::insert_into(auth_accounts::table)
        .values(&new_account)
        .execute(conn)?;

    insert_profile(
        conn,
        &account_id,
        display_name,
        account_email,
        avatar_url,
        &[Role::Requester],
    )?;

    auth_accounts::table
        .filter(auth_accounts::id.eq(&account_id))
        .first::<AuthAccount>(conn)
}
