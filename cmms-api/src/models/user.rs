use diesel::{Identifiable, Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::Role;
use crate::schema::users;

/// Raw profile row. The role set is stored as a JSON array of role labels;
/// the API-facing [`User`] carries the parsed set.
#[derive(Clone, Queryable, Identifiable, QueryableByName, Debug)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub roles: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub roles: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub roles: Vec<Role>,
}

/// Payload for the composite create-user operation.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let roles: Vec<Role> = serde_json::from_str(&row.roles)
            .map_err(|e| format!("invalid role set for user '{}': {e}", row.id))?;
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            avatar_url: row.avatar_url,
            roles,
        })
    }
}
