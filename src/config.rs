use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::mail::gmail_client::GMAIL_API_BASE;

pub const APP_DIR: &str = "gmail_threads";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
pub const DEFAULT_LABEL: &str = "INBOX";
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_OUTPUT_PATH: &str = "email_threads.json";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub client_id: String,
    pub user_email: Option<String>,
    pub redirect_uri: Option<String>,
    pub label: Option<String>,
    pub max_results: Option<u32>,
    pub output_path: Option<String>,
    pub api_base: Option<String>,
}

impl Config {
    fn template() -> Self {
        Self {
            client_id: "YOUR_CLIENT_ID.apps.googleusercontent.com".to_string(),
            user_email: Some("you@example.com".to_string()),
            redirect_uri: Some(DEFAULT_REDIRECT_URI.to_string()),
            label: Some(DEFAULT_LABEL.to_string()),
            max_results: Some(DEFAULT_MAX_RESULTS),
            output_path: None,
            api_base: None,
        }
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uri.as_deref().unwrap_or(DEFAULT_REDIRECT_URI)
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn max_results(&self) -> u32 {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH))
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(GMAIL_API_BASE)
    }
}

/// `<config dir>/gmail_threads`, created on demand.
pub fn app_dir() -> Result<PathBuf> {
    let p = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join(APP_DIR);
    fs::create_dir_all(&p)?;
    Ok(p)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Read `path`; if it doesn't exist, write a template there and fail so the
/// user can fill it in.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let tom = toml::to_string_pretty(&Config::template())?;
        fs::write(path, tom)?;
        return Err(anyhow::anyhow!(
            "Created template config at {} (edit it and run again)",
            path.display()
        ));
    }
    let s = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&s)?;
    Ok(cfg)
}
