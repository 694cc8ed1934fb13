use clap::Subcommand;
use diesel::sqlite::SqliteConnection;

use cmms_api::orm::company::{get_all_companies, insert_company};
use cmms_api::orm::site::get_sites_by_company;

use crate::admin_cli::utils::build_matcher;

#[derive(Subcommand)]
pub enum CompanyAction {
    #[command(about = "List companies, optionally filtered by search term")]
    Ls {
        #[arg(help = "Search term (regex by default, use -F for fixed string)")]
        search_term: Option<String>,
        #[arg(
            short = 'F',
            long = "fixed-string",
            help = "Treat search term as fixed string instead of regex"
        )]
        fixed_string: bool,
    },
    #[command(about = "Add a new company")]
    Add {
        #[arg(short, long, help = "Company name")]
        name: String,
    },
}

pub fn handle_company_command_with_conn(
    conn: &mut SqliteConnection,
    action: CompanyAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CompanyAction::Ls {
            search_term,
            fixed_string,
        } => company_ls_impl(conn, search_term, fixed_string),
        CompanyAction::Add { name } => company_add_impl(conn, name),
    }
}

fn company_ls_impl(
    conn: &mut SqliteConnection,
    search_term: Option<String>,
    fixed_string: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let matcher = build_matcher(search_term, fixed_string)?;
    let companies = get_all_companies(conn)?;

    let mut shown = 0;
    for company in companies.iter().filter(|c| matcher(&c.name)) {
        let site_count = get_sites_by_company(conn, company.id)?.len();
        println!("{:>5}  {}  ({} sites)", company.id, company.name, site_count);
        shown += 1;
    }
    if shown == 0 {
        println!("No matching companies.");
    }
    Ok(())
}

fn company_add_impl(
    conn: &mut SqliteConnection,
    name: String,
) -> Result<(), Box<dyn std::error::Error>> {
    if name.trim().is_empty() {
        return Err("Company name must not be empty".into());
    }
    let company = insert_company(conn, name)?;
    println!("Created company '{}' (ID: {})", company.name, company.id);
    Ok(())
}
