use clap::Subcommand;
use diesel::sqlite::SqliteConnection;
use rpassword::prompt_password;

use cmms_api::orm::login::{avatar_url_for, sign_up_account};
use cmms_api::orm::provision::temp_password;
use cmms_api::orm::user::{get_user_by_email, list_all_users, update_user_roles};

use crate::admin_cli::utils::{build_matcher, parse_roles};

#[derive(Subcommand)]
pub enum UserAction {
    #[command(about = "List users, optionally filtered by search term")]
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
    #[command(about = "Add a new user (auth identity plus profile)")]
    Add {
        #[arg(short, long, help = "Display name")]
        name: String,
        #[arg(short, long, help = "Email address")]
        email: String,
        #[arg(
            short,
            long,
            help = "Comma-separated role labels (e.g. \"Admin,Requester\")"
        )]
        roles: String,
        #[arg(
            short,
            long,
            help = "Password (will be prompted securely if not provided)"
        )]
        password: Option<String>,
    },
    #[command(about = "Set all roles for a user (replaces existing roles)")]
    SetRoles {
        #[arg(short, long, help = "User email address")]
        email: String,
        #[arg(short, long, help = "Comma-separated list of role labels")]
        roles: String,
    },
}

pub fn handle_user_command_with_conn(
    conn: &mut SqliteConnection,
    action: UserAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        UserAction::Ls {
            search_term,
            fixed_string,
        } => user_ls_impl(conn, search_term, fixed_string),
        UserAction::Add {
            name,
            email,
            roles,
            password,
        } => user_add_impl(conn, &name, &email, &roles, password),
        UserAction::SetRoles { email, roles } => set_roles_impl(conn, &email, &roles),
    }
}

fn user_ls_impl(
    conn: &mut SqliteConnection,
    search_term: Option<String>,
    fixed_string: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let matcher = build_matcher(search_term, fixed_string)?;
    let users = list_all_users(conn)?;

    let mut shown = 0;
    for user in users
        .iter()
        .filter(|u| matcher(&u.name) || matcher(&u.email))
    {
        let labels: Vec<&str> = user.roles.iter().map(|r| r.label()).collect();
        println!("{}  {} <{}>  [{}]", user.id, user.name, user.email, labels.join(", "));
        shown += 1;
    }
    if shown == 0 {
        println!("No matching users.");
    }
    Ok(())
}

fn user_add_impl(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    roles: &str,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err("Name and email are required".into());
    }
    let roles = parse_roles(roles)?;

    let mut generated = false;
    let password = match password {
        Some(p) => p,
        None => {
            let entered = prompt_password("Password (leave empty for a generated one): ")?;
            if entered.is_empty() {
                generated = true;
                temp_password()
            } else {
                entered
            }
        }
    };

    let account = sign_up_account(conn, email, &password, name, &avatar_url_for(name))?;
    let user = update_user_roles(conn, &account.id, &roles)?;

    println!("Created user '{}' <{}> (ID: {})", user.name, user.email, user.id);
    if generated {
        println!("Temporary password: {password}");
    }
    Ok(())
}

fn set_roles_impl(
    conn: &mut SqliteConnection,
    email: &str,
    roles: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let roles = parse_roles(roles)?;
    let user = get_user_by_email(conn, email)?
        .ok_or_else(|| format!("No user with email '{email}'"))?;

    let updated = update_user_roles(conn, &user.id, &roles)?;
    let labels: Vec<&str> = updated.roles.iter().map(|r| r.label()).collect();
    println!("Set roles for '{}': {}", updated.email, labels.join(", "));
    Ok(())
}
