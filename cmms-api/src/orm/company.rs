use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::models::{Company, NewCompany};

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Inserts a new company and returns the stored row.
pub fn insert_company(
    conn: &mut SqliteConnection,
    company_name: String,
) -> Result<Company, diesel::result::Error> {
    use crate::schema::companies::dsl::*;

    let new_company = NewCompany { name: company_name };

    diesel::insert_into(companies)
        .values(&new_company)
        .execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    companies.filter(id.eq(last_id as i32)).first::<Company>(conn)
}

/// Returns all companies in ascending order by id.
pub fn get_all_companies(
    conn: &mut SqliteConnection,
) -> Result<Vec<Company>, diesel::result::Error> {
    use crate::schema::companies::dsl::*;
    companies.order(id.asc()).load::<Company>(conn)
}

/// Gets a single company by ID.
pub fn get_company_by_id(
    conn: &mut SqliteConnection,
    company_id: i32,
) -> Result<Option<Company>, diesel::result::Error> {
    use crate::schema::companies::dsl::*;
    companies
        .filter(id.eq(company_id))
        .first::<Company>(conn)
        .optional()
}

/// Gets a single company by name (case-insensitive).
pub fn get_company_by_name_case_insensitive(
    conn: &mut SqliteConnection,
    company_name: &str,
) -> Result<Option<Company>, diesel::result::Error> {
    diesel::sql_query("SELECT * FROM companies WHERE LOWER(name) = LOWER(?)")
        .bind::<diesel::sql_types::Text, _>(company_name)
        .get_result::<Company>(conn)
        .optional()
}

/// Counts all companies. Site creation requires at least one to exist.
pub fn count_companies(conn: &mut SqliteConnection) -> Result<i64, diesel::result::Error> {
    use crate::schema::companies::dsl::*;
    companies.count().get_result(conn)
}
