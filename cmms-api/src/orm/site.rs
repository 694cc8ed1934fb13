use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::models::{NewSite, Site};

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    last_insert_rowid: i64,
}

/// Inserts a new site for a company and returns the stored row.
pub fn insert_site(
    conn: &mut SqliteConnection,
    site_name: String,
    site_company_id: i32,
) -> Result<Site, diesel::result::Error> {
    use crate::schema::sites::dsl::*;

    let new_site = NewSite {
        name: site_name,
        company_id: site_company_id,
    };

    diesel::insert_into(sites).values(&new_site).execute(conn)?;

    let last_id = diesel::sql_query("SELECT last_insert_rowid() as last_insert_rowid")
        .get_result::<LastInsertRowId>(conn)?
        .last_insert_rowid;

    sites.filter(id.eq(last_id as i32)).first::<Site>(conn)
}

/// Returns all sites in ascending order by id.
pub fn get_all_sites(conn: &mut SqliteConnection) -> Result<Vec<Site>, diesel::result::Error> {
    use crate::schema::sites::dsl::*;
    sites.order(id.asc()).load::<Site>(conn)
}

/// Gets a single site by ID.
pub fn get_site_by_id(
    conn: &mut SqliteConnection,
    site_id: i32,
) -> Result<Option<Site>, diesel::result::Error> {
    use crate::schema::sites::dsl::*;
    sites.filter(id.eq(site_id)).first::<Site>(conn).optional()
}

/// Returns all sites belonging to a company, ordered by id.
pub fn get_sites_by_company(
    conn: &mut SqliteConnection,
    target_company_id: i32,
) -> Result<Vec<Site>, diesel::result::Error> {
    use crate::schema::sites::dsl::*;
    sites
        .filter(company_id.eq(target_company_id))
        .order(id.asc())
        .load::<Site>(conn)
}
