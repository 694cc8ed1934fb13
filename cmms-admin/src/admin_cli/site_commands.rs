use clap::Subcommand;
use diesel::sqlite::SqliteConnection;

use cmms_api::orm::company::get_company_by_id;
use cmms_api::orm::site::{get_all_sites, insert_site};

use crate::admin_cli::utils::{build_matcher, resolve_company_id};

#[derive(Subcommand)]
pub enum SiteAction {
    #[command(about = "List sites, optionally filtered by search term")]
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
    #[command(about = "Add a new site")]
    Add {
        #[arg(short, long, help = "Site name")]
        name: String,
        #[arg(short, long, help = "Company ID or name the site belongs to")]
        company: String,
    },
}

pub fn handle_site_command_with_conn(
    conn: &mut SqliteConnection,
    action: SiteAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SiteAction::Ls {
            search_term,
            fixed_string,
        } => site_ls_impl(conn, search_term, fixed_string),
        SiteAction::Add { name, company } => site_add_impl(conn, name, &company),
    }
}

fn site_ls_impl(
    conn: &mut SqliteConnection,
    search_term: Option<String>,
    fixed_string: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let matcher = build_matcher(search_term, fixed_string)?;
    let sites = get_all_sites(conn)?;

    let mut shown = 0;
    for site in sites.iter().filter(|s| matcher(&s.name)) {
        let company_name = get_company_by_id(conn, site.company_id)?
            .map(|c| c.name)
            .unwrap_or_else(|| "unknown".to_string());
        println!("{:>5}  {}  [{}]", site.id, site.name, company_name);
        shown += 1;
    }
    if shown == 0 {
        println!("No matching sites.");
    }
    Ok(())
}

fn site_add_impl(
    conn: &mut SqliteConnection,
    name: String,
    company: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if name.trim().is_empty() {
        return Err("Site name must not be empty".into());
    }
    let company_id = resolve_company_id(conn, company)?;
    let site = insert_site(conn, name, company_id)?;
    println!(
        "Created site '{}' (ID: {}) under company {}",
        site.name, site.id, site.company_id
    );
    Ok(())
}
