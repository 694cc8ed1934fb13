//! Test scaffolding: in-memory rocket instances and bare SQLite connections
//! for unit tests.

use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use rocket::figment::{
    util::map,
    value::{Map, Value},
};
use rocket::{Build, Rocket, fairing::AdHoc};
use rocket_sync_db_pools::diesel;

use super::db::{DbConn, run_pending_migrations, set_foreign_keys};
use crate::admin_init_fairing::admin_init_fairing;
use crate::orm::login::DbRunner;

/// Configures SQLite with performance-optimized settings for testing.
///
/// These settings make SQLite faster but less durable - only use for
/// testing.
///
/// # Panics
/// Panics if the PRAGMA commands fail to execute
fn set_sqlite_test_pragmas(conn: &mut diesel::SqliteConnection) {
    conn.batch_execute(
        r#"
        PRAGMA synchronous = OFF;
        PRAGMA journal_mode = OFF;
        "#,
    )
    .expect("Failed to set SQLite PRAGMAs");
}

fn set_sqlite_test_pragmas_fairing() -> AdHoc {
    AdHoc::on_ignite("Set SQLite Test Pragmas", |rocket| async {
        let conn = DbConn::get_one(&rocket)
            .await
            .expect("database connection for migration");
        conn.run(|c| {
            set_sqlite_test_pragmas(c);
        })
        .await;
        rocket
    })
}

/// Creates and configures a Rocket instance for testing with an in-memory
/// SQLite database.
///
/// The returned Rocket instance will have:
/// - A unique in-memory SQLite database configured
/// - Database connection pool attached
/// - Foreign keys enabled, testing pragmas set, all migrations run
/// - The default admin bootstrapped
/// - The reference-data cache loaded
/// - API routes and the page shell mounted
pub fn test_rocket() -> Rocket<Build> {
    use uuid::Uuid;

    // Generate a unique database name for this test instance
    let unique_db_name = format!("file:test_db_{}?mode=memory&cache=shared", Uuid::new_v4());

    let db_config: Map<_, Value> = map! {
        "url" => unique_db_name.into(),  // Unique shared in-memory DB per test
        "pool_size" => 5.into(),
        "timeout" => 5.into(),
    };

    let databases = map!["cmms_db" => db_config];

    let figment = rocket::Config::figment().merge(("databases", databases));

    let rocket = rocket::custom(figment)
        .attach(DbConn::fairing())
        .attach(super::db::set_foreign_keys_fairing())
        .attach(set_sqlite_test_pragmas_fairing())
        .attach(super::db::run_migrations_fairing())
        .attach(admin_init_fairing())
        .attach(crate::reference::load_reference_fairing());
    let rocket = crate::register_error_catchers(rocket);

    crate::mount_api_routes(rocket).mount("/", crate::routing::routes())
}

/// Creates a synchronous in-memory SQLite database connection for unit
/// tests, with foreign keys on and all migrations run.
///
/// Each call returns a new, independent in-memory database.
pub fn setup_test_db() -> SqliteConnection {
    use diesel::Connection;

    let mut conn = SqliteConnection::establish(":memory:")
        .expect("Failed to create in-memory SQLite database");
    set_foreign_keys(&mut conn);
    run_pending_migrations(&mut conn);
    conn
}

/// A minimal async-compatible wrapper for a synchronous SQLite connection,
/// for code that expects a Rocket-style `.run()` interface.
pub struct FakeDbConn<'a>(pub &'a mut diesel::SqliteConnection);

impl<'a> FakeDbConn<'a> {
    /// Executes a closure with a mutable reference to the underlying SQLite
    /// connection, mimicking the async `.run()` interface synchronously.
    ///
    /// # Safety
    /// Converts an immutable reference to mutable; safe here because tests
    /// hold exclusive access to the wrapped connection.
    pub async fn run<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut diesel::SqliteConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        unsafe {
            let conn_ptr =
                self.0 as *const diesel::SqliteConnection as *mut diesel::SqliteConnection;
            f(&mut *conn_ptr)
        }
    }
}

impl<'a> DbRunner for FakeDbConn<'a> {
    fn run<F, R>(&self, f: F) -> impl std::future::Future<Output = R>
    where
        F: FnOnce(&mut diesel::SqliteConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        FakeDbConn::run(self, f)
    }
}

/// Creates a `FakeDbConn` for async-style testing with the given SQLite
/// connection.
pub fn setup_test_dbconn<'a>(conn: &'a mut diesel::SqliteConnection) -> FakeDbConn<'a> {
    FakeDbConn(conn)
}
