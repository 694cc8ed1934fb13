use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable};

use crate::schema::auth_accounts;

/// An authentication identity. Separate from the profile row: the profile
/// carries the role set, the account carries the credentials.
#[derive(Clone, Queryable, Identifiable, Debug)]
#[diesel(table_name = auth_accounts)]
pub struct AuthAccount {
    pub id: String, // Opaque identity string (UUID)
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub avatar_url: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = auth_accounts)]
pub struct NewAuthAccount {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub avatar_url: String,
    pub created_at: NaiveDateTime,
}
