//! Startup configuration.
//!
//! Two string values are required before the application may mount: the
//! backing store URL and the store's public API key. A missing value or an
//! obvious placeholder is fatal at startup: the server comes up with only
//! the configuration-required notice and never touches the store.

use std::fmt;

use dotenvy::dotenv;

pub const DATABASE_URL_VAR: &str = "CMMS_DATABASE_URL";
pub const API_KEY_VAR: &str = "CMMS_API_KEY";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Placeholder(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => {
                write!(f, "{var} is not set; configure it before starting the server")
            }
            ConfigError::Placeholder(var) => {
                write!(f, "{var} still holds a placeholder value; replace it with the real credential")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Placeholder detection: empty values and the template markers shipped in
/// sample configuration files.
fn is_placeholder(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    normalized.is_empty() || normalized.contains("insert") || normalized.contains("changeme")
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    let value = std::env::var(var).map_err(|_| ConfigError::Missing(var))?;
    if is_placeholder(&value) {
        return Err(ConfigError::Placeholder(var));
    }
    Ok(value)
}

impl AppConfig {
    /// Reads the configuration from the environment (honoring `.env`).
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        dotenv().ok();
        Ok(AppConfig {
            database_url: required(DATABASE_URL_VAR)?,
            api_key: required(API_KEY_VAR)?,
        })
    }

    /// The API key, safe for logs: first four characters, then an ellipsis.
    pub fn masked_api_key(&self) -> String {
        let visible: String = self.api_key.chars().take(4).collect();
        format!("{visible}…")
    }
}
