use diesel::prelude::*;

use crate::models::{NewUser, Role, User, UserRow};

fn deserialization_error(message: String) -> diesel::result::Error {
    diesel::result::Error::DeserializationError(message.into())
}

fn row_to_user(row: UserRow) -> Result<User, diesel::result::Error> {
    User::try_from(row).map_err(deserialization_error)
}

pub fn roles_to_json(roles: &[Role]) -> String {
    serde_json::to_string(roles).expect("role labels always serialize")
}

/// Inserts a profile row. Profile ids match the auth account that owns them.
pub fn insert_profile(
    conn: &mut SqliteConnection,
    profile_id: &str,
    profile_name: &str,
    profile_email: &str,
    profile_avatar_url: &str,
    profile_roles: &[Role],
) -> Result<User, diesel::result::Error> {
    use crate::schema::users::dsl::*;

    let new_user = NewUser {
        id: profile_id.to_string(),
        name: profile_name.to_string(),
        email: profile_email.to_string(),
        avatar_url: profile_avatar_url.to_string(),
        roles: roles_to_json(profile_roles),
    };

    diesel::insert_into(users).values(&new_user).execute(conn)?;

    let row = users.filter(id.eq(profile_id)).first::<UserRow>(conn)?;
    row_to_user(row)
}

/// Returns all profiles in ascending order by name.
pub fn list_all_users(conn: &mut SqliteConnection) -> Result<Vec<User>, diesel::result::Error> {
    use crate::schema::users::dsl::*;
    users
        .order(name.asc())
        .load::<UserRow>(conn)?
        .into_iter()
        .map(row_to_user)
        .collect()
}

/// Gets a single profile by its identity id.
pub fn get_user_by_id(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<User>, diesel::result::Error> {
    use crate::schema::users::dsl::*;
    let row = users
        .filter(id.eq(user_id))
        .first::<UserRow>(conn)
        .optional()?;
    row.map(row_to_user).transpose()
}

/// Gets a single profile by email (case-insensitive).
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    user_email: &str,
) -> Result<Option<User>, diesel::result::Error> {
    diesel::sql_query("SELECT * FROM users WHERE LOWER(email) = LOWER(?)")
        .bind::<diesel::sql_types::Text, _>(user_email)
        .get_result::<UserRow>(conn)
        .optional()?
        .map(row_to_user)
        .transpose()
}

/// Replaces a profile's role set and returns the updated profile.
///
/// Returns `Err(NotFound)` when no profile row exists for the id, so the
/// caller can distinguish a missing profile from a write failure.
pub fn update_user_roles(
    conn: &mut SqliteConnection,
    user_id: &str,
    new_roles: &[Role],
) -> Result<User, diesel::result::Error> {
    use crate::schema::users::dsl::*;

    let affected = diesel::update(users.filter(id.eq(user_id)))
        .set(roles.eq(roles_to_json(new_roles)))
        .execute(conn)?;
    if affected == 0 {
        return Err(diesel::result::Error::NotFound);
    }

    let row = users.filter(id.eq(user_id)).first::<UserRow>(conn)?;
    row_to_user(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orm::testing::setup_test_db;

    #[test]
    fn test_insert_and_fetch_profile() {
        let mut conn = setup_test_db();

        let created = insert_profile(
            &mut conn,
            "id-1",
            "Ada Lovelace",
            "ada@example.com",
            "https://example.com/ada.svg",
            &[Role::Requester],
        )
        .expect("Failed to insert profile");
        assert_eq!(created.roles, vec![Role::Requester]);

        let fetched = get_user_by_id(&mut conn, "id-1")
            .unwrap()
            .expect("profile should exist");
        assert_eq!(fetched.name, "Ada Lovelace");
        assert_eq!(fetched.email, "ada@example.com");
    }

    #[test]
    fn test_update_user_roles_replaces_the_set() {
        let mut conn = setup_test_db();

        insert_profile(
            &mut conn,
            "id-1",
            "Ada Lovelace",
            "ada@example.com",
            "",
            &[Role::Requester],
        )
        .unwrap();

        let updated = update_user_roles(
            &mut conn,
            "id-1",
            &[Role::Admin, Role::WarehouseManager],
        )
        .unwrap();
        assert_eq!(updated.roles, vec![Role::Admin, Role::WarehouseManager]);
    }

    #[test]
    fn test_update_user_roles_missing_profile_is_not_found() {
        let mut conn = setup_test_db();

        let result = update_user_roles(&mut conn, "ghost", &[Role::Admin]);
        assert!(matches!(result, Err(diesel::result::Error::NotFound)));
    }

    #[test]
    fn test_list_orders_by_name() {
        let mut conn = setup_test_db();

        insert_profile(&mut conn, "a", "Zadie", "z@example.com", "", &[Role::Requester]).unwrap();
        insert_profile(&mut conn, "b", "Ada", "a@example.com", "", &[Role::Requester]).unwrap();

        let names: Vec<_> = list_all_users(&mut conn)
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Zadie"]);
    }
}
