//! The reference-data cache: companies, sites and users, loaded once per
//! process and shared read-only across views.
//!
//! The three list-fetches run concurrently with join-all semantics: all
//! three are awaited, and a single error string is recorded if any fails.
//! Data from the fetches that did succeed is still exposed. `reload` swaps
//! the whole snapshot; concurrent reloads race and the last write wins -
//! there is no cancellation of an in-flight load.

use std::sync::RwLock;

use rocket::fairing::AdHoc;
use rocket::serde::Serialize;
use ts_rs::TS;

use crate::models::{Company, Site, User};
use crate::orm;
use crate::orm::DbConn;

/// The literal returned for site lookups that miss. Rendered as-is.
pub const UNKNOWN_SITE: &str = "unknown";

#[derive(Clone, Debug, Default, Serialize, TS)]
#[ts(export)]
pub struct ReferenceSnapshot {
    pub users: Vec<User>,
    pub companies: Vec<Company>,
    pub sites: Vec<Site>,
    pub error: Option<String>,
}

impl ReferenceSnapshot {
    /// Id→user lookup; `None` when the id is not in the snapshot.
    pub fn find_user_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Id→site-name lookup with the `"unknown"` sentinel; never fails.
    pub fn site_name(&self, id: i32) -> String {
        self.sites
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| UNKNOWN_SITE.to_string())
    }
}

/// Rocket-managed holder for the current snapshot.
pub struct ReferenceData {
    inner: RwLock<ReferenceSnapshot>,
}

impl ReferenceData {
    pub fn new(snapshot: ReferenceSnapshot) -> Self {
        ReferenceData {
            inner: RwLock::new(snapshot),
        }
    }

    pub fn snapshot(&self) -> ReferenceSnapshot {
        self.inner
            .read()
            .expect("reference snapshot lock poisoned")
            .clone()
    }

    /// Replaces the snapshot wholesale. Last write wins.
    pub fn replace(&self, snapshot: ReferenceSnapshot) {
        *self
            .inner
            .write()
            .expect("reference snapshot lock poisoned") = snapshot;
    }

    /// Re-runs the three fetches and swaps the snapshot in.
    pub async fn reload(&self, users_db: DbConn, companies_db: DbConn, sites_db: DbConn) {
        let snapshot = load_snapshot(users_db, companies_db, sites_db).await;
        self.replace(snapshot);
    }
}

/// Issues the three list-fetches concurrently and waits for all of them.
/// A single error string is kept (the first failure); partial data from the
/// fetches that succeeded is still part of the snapshot.
pub async fn load_snapshot(
    users_db: DbConn,
    companies_db: DbConn,
    sites_db: DbConn,
) -> ReferenceSnapshot {
    let (users_res, companies_res, sites_res) = rocket::tokio::join!(
        users_db.run(|conn| orm::user::list_all_users(conn)),
        companies_db.run(|conn| orm::company::get_all_companies(conn)),
        sites_db.run(|conn| orm::site::get_all_sites(conn)),
    );

    let mut snapshot = ReferenceSnapshot::default();
    let mut error: Option<String> = None;

    match users_res {
        Ok(users) => snapshot.users = users,
        Err(e) => error = error.or_else(|| Some(e.to_string())),
    }
    match companies_res {
        Ok(companies) => snapshot.companies = companies,
        Err(e) => error = error.or_else(|| Some(e.to_string())),
    }
    match sites_res {
        Ok(sites) => snapshot.sites = sites,
        Err(e) => error = error.or_else(|| Some(e.to_string())),
    }

    snapshot.error = error;
    snapshot
}

/// Fairing that performs the initial load and manages the cache state.
pub fn load_reference_fairing() -> AdHoc {
    AdHoc::on_ignite("Reference Data", |rocket| async {
        let users_db = DbConn::get_one(&rocket)
            .await
            .expect("database connection for reference data");
        let companies_db = DbConn::get_one(&rocket)
            .await
            .expect("database connection for reference data");
        let sites_db = DbConn::get_one(&rocket)
            .await
            .expect("database connection for reference data");

        let snapshot = load_snapshot(users_db, companies_db, sites_db).await;
        if let Some(err) = &snapshot.error {
            warn!("[reference] initial load reported an error: {}", err);
        }
        rocket.manage(ReferenceData::new(snapshot))
    })
}
