use diesel::sqlite::SqliteConnection;
use dotenvy::dotenv;
use regex::Regex;

use cmms_api::models::Role;
use cmms_api::orm::company::{get_company_by_id, get_company_by_name_case_insensitive};

pub fn establish_connection() -> Result<SqliteConnection, Box<dyn std::error::Error>> {
    use diesel::Connection;

    dotenv().ok();
    let database_url = std::env::var("CMMS_DATABASE_URL")
        .map_err(|_| "CMMS_DATABASE_URL must be set")?;
    let mut conn = SqliteConnection::establish(&database_url)?;
    cmms_api::orm::set_foreign_keys(&mut conn);
    cmms_api::orm::run_pending_migrations(&mut conn);
    Ok(conn)
}

/// Builds the ls-style matcher: regex by default, fixed string with -F.
pub fn build_matcher(
    search_term: Option<String>,
    fixed_string: bool,
) -> Result<Box<dyn Fn(&str) -> bool>, Box<dyn std::error::Error>> {
    match search_term {
        None => Ok(Box::new(|_| true)),
        Some(term) if fixed_string => Ok(Box::new(move |candidate| candidate.contains(&term))),
        Some(term) => {
            let regex = Regex::new(&term)?;
            Ok(Box::new(move |candidate| regex.is_match(candidate)))
        }
    }
}

/// Resolves a company identifier (numeric ID or name) to a company ID.
/// Names are looked up case-insensitively.
pub fn resolve_company_id(
    conn: &mut SqliteConnection,
    company_identifier: &str,
) -> Result<i32, Box<dyn std::error::Error>> {
    if let Ok(id) = company_identifier.parse::<i32>() {
        return match get_company_by_id(conn, id)? {
            Some(company) => Ok(company.id),
            None => Err(format!("No company with ID {id}").into()),
        };
    }

    match get_company_by_name_case_insensitive(conn, company_identifier)? {
        Some(company) => Ok(company.id),
        None => Err(format!("No company named '{company_identifier}'").into()),
    }
}

/// Parses a comma-separated role list into the role enum, naming the valid
/// labels on failure.
pub fn parse_roles(raw: &str) -> Result<Vec<Role>, Box<dyn std::error::Error>> {
    let mut roles = Vec::new();
    for label in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match Role::from_label(label) {
            Some(role) => {
                if !roles.contains(&role) {
                    roles.push(role);
                }
            }
            None => {
                let valid: Vec<&str> = Role::ALL.iter().map(|r| r.label()).collect();
                return Err(format!(
                    "Unknown role '{label}'. Valid roles: {}",
                    valid.join(", ")
                )
                .into());
            }
        }
    }
    if roles.is_empty() {
        return Err("At least one role must be provided".into());
    }
    Ok(roles)
}
