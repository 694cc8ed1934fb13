//! Database operations for logout and session revocation.

use diesel::prelude::*;

use crate::{DbConn, schema::sessions::dsl::*};

/// Revokes a session by marking it as revoked in the database.
///
/// The session row is kept for auditing; only the `revoked` flag flips.
/// Non-existent session ids affect zero rows and are not an error.
pub async fn revoke_session(db: &DbConn, session_id: &str) -> Result<usize, diesel::result::Error> {
    let session_id = session_id.to_string();
    db.run(move |conn| {
        diesel::update(sessions.filter(id.eq(&session_id)))
            .set(revoked.eq(true))
            .execute(conn)
    })
    .await
}
