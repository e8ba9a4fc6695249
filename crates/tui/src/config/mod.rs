use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";
const DEFAULT_TOKEN_PATH: &str = "config/paydeck_session.json";

/// API paths, all overridable through the config file or environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub login: String,
    pub reset_request: String,
    pub reset_password: String,
    pub me: String,
    pub transactions_list: String,
    pub transactions_create: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/auth/login".to_string(),
            reset_request: "/auth/forgot-password".to_string(),
            reset_password: "/auth/reset-password".to_string(),
            me: "/auth/me".to_string(),
            transactions_list: "/transactions".to_string(),
            transactions_create: "/transactions".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub username: String,
    pub token_path: String,
    /// Sent as `X-CSRF-Token` on every request when set.
    pub csrf_token: Option<String>,
    pub endpoints: Endpoints,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            username: String::new(),
            token_path: DEFAULT_TOKEN_PATH.to_string(),
            csrf_token: None,
            endpoints: Endpoints::default(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "paydeck_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://localhost:4000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override username prefill (password is never read from CLI).
    #[arg(long)]
    username: Option<String>,
    /// Override the session token file path.
    #[arg(long)]
    token_path: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("PAYDECK_TUI").separator("__"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(username) = args.username {
        settings.username = username;
    }
    if let Some(token_path) = args.token_path {
        settings.token_path = token_path;
    }

    Ok(settings)
}
