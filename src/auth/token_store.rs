use anyhow::{Result, anyhow};
use keyring::{Entry, Error as KeyringError};

use crate::config::APP_DIR;

/// Keyring service name shared by every secret this tool stores.
const SERVICE: &str = APP_DIR;

fn set_secret(key: &str, secret: &str) -> Result<()> {
    Entry::new(SERVICE, key)?
        .set_password(secret)
        .map_err(|e| anyhow!(e.to_string()))
}

fn get_secret(key: &str) -> Result<Option<String>> {
    match Entry::new(SERVICE, key)?.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(KeyringError::NoEntry) => Ok(None),
        Err(e) => Err(anyhow!(e.to_string())),
    }
}

/// Refresh tokens are keyed by the account's email address.
pub fn save_refresh_token(user_email: &str, refresh_token: &str) -> Result<()> {
    set_secret(user_email, refresh_token)
}

pub fn load_refresh_token(user_email: &str) -> Result<Option<String>> {
    get_secret(user_email)
}

/// Client secrets are keyed by OAuth client id.
pub fn save_client_secret(client_id: &str, client_secret: &str) -> Result<()> {
    set_secret(client_id, client_secret)
}

pub fn load_client_secret(client_id: &str) -> Result<Option<String>> {
    get_secret(client_id)
}
