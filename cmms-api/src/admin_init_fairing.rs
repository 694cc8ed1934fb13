use diesel::prelude::*;
use dotenvy::dotenv;
use rocket::fairing::AdHoc;

use crate::models::Role;
use crate::orm::DbConn;
use crate::orm::login::{avatar_url_for, display_name_from_email, sign_up_account};
use crate::orm::user::update_user_roles;
use crate::schema::auth_accounts;

/// Bootstraps the default admin account if needed.
///
/// Email and password come from CMMS_DEFAULT_EMAIL and
/// CMMS_DEFAULT_PASSWORD; the account receives the Admin role. Idempotent
/// across restarts.
pub fn admin_init_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Admin User Initialization", |rocket| async {
        dotenv().ok();

        let conn = match DbConn::get_one(&rocket).await {
            Some(conn) => conn,
            None => {
                error!("[admin-init] ERROR: Could not get DB connection.");
                return Err(rocket);
            }
        };

        let admin_email = get_admin_email();
        let result = conn
            .run(move |c| create_admin_if_needed(c, &admin_email))
            .await;

        match result {
            Ok(()) => Ok(rocket),
            Err(e) => {
                error!("[admin-init] FATAL: Admin bootstrap failed: {:?}", e);
                Err(rocket)
            }
        }
    })
}

fn get_admin_email() -> String {
    std::env::var("CMMS_DEFAULT_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string())
}

fn get_admin_password() -> String {
    std::env::var("CMMS_DEFAULT_PASSWORD").unwrap_or_else(|_| "admin".to_string())
}

fn admin_account_exists(
    c: &mut SqliteConnection,
    admin_email: &str,
) -> Result<bool, diesel::result::Error> {
    let existing = auth_accounts::table
        .filter(auth_accounts::email.eq(admin_email))
        .first::<crate::models::AuthAccount>(c)
        .optional()?;
    Ok(existing.is_some())
}

fn create_admin_if_needed(
    c: &mut SqliteConnection,
    admin_email: &str,
) -> Result<(), diesel::result::Error> {
    if admin_account_exists(c, admin_email)? {
        info!("[admin-init] Admin account '{}' already exists", admin_email);
        return Ok(());
    }

    let display_name = display_name_from_email(admin_email);
    let avatar_url = avatar_url_for(&display_name);
    let account = sign_up_account(
        c,
        admin_email,
        &get_admin_password(),
        &display_name,
        &avatar_url,
    )?;
    update_user_roles(c, &account.id, &[Role::Admin])?;

    info!("[admin-init] Created admin account: '{}'", admin_email);
    Ok(())
}
