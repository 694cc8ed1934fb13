// cmms-admin/src/main.rs

use clap::{Parser, Subcommand};

mod admin_cli;

use admin_cli::company_commands::{CompanyAction, handle_company_command_with_conn};
use admin_cli::site_commands::{SiteAction, handle_site_command_with_conn};
use admin_cli::user_commands::{UserAction, handle_user_command_with_conn};
use admin_cli::utils::establish_connection;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Parser)]
#[command(name = "cmms-admin")]
#[command(about = "CMMS administration CLI")]
#[command(version)]
struct Cli {
    /// Show extended version information
    #[arg(long, action = clap::ArgAction::SetTrue)]
    version_info: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Manage companies")]
    Company {
        #[command(subcommand)]
        action: CompanyAction,
    },
    #[command(about = "Manage sites")]
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },
    #[command(about = "Manage users")]
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.version_info {
        println!("cmms-admin {}", built_info::PKG_VERSION);
        println!("Built: {}", built_info::BUILT_TIME_UTC);
        if let Some(commit) = built_info::GIT_COMMIT_HASH {
            println!("Git commit: {}", commit);
        }
        return;
    }

    let Some(command) = cli.command else {
        eprintln!("No command given; try --help");
        std::process::exit(2);
    };

    let mut conn = match establish_connection() {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to connect to the database: {e}");
            std::process::exit(1);
        }
    };

    let result = match command {
        Commands::Company { action } => handle_company_command_with_conn(&mut conn, action),
        Commands::Site { action } => handle_site_command_with_conn(&mut conn, action),
        Commands::User { action } => handle_user_command_with_conn(&mut conn, action),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
