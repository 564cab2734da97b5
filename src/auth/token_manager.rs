use anyhow::{Result, anyhow};
use log::{debug, info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::oauth::{self, GMAIL_READONLY_SCOPE, Tokens};
use crate::auth::{token_store, tokens_file};
use crate::config::Config;

/// Used when the provider doesn't say how long a token lives.
const FALLBACK_LIFETIME_SECS: i64 = 3500;

#[derive(Clone)]
pub struct TokenManager {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub user_email: String,
}

impl TokenManager {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let user_email = cfg
            .user_email
            .clone()
            .ok_or_else(|| anyhow!("user_email not set in config"))?;

        let client_secret = token_store::load_client_secret(&cfg.client_id)?
            .or_else(|| std::env::var("OAUTH_CLIENT_SECRET").ok());

        Ok(Self {
            client_id: cfg.client_id.clone(),
            client_secret,
            redirect_uri: cfg.redirect_uri().to_string(),
            user_email,
        })
    }

    /// Returns a valid access token: cached one if unexpired, else refresh,
    /// else the interactive PKCE flow.
    pub fn get_access_token(&self) -> Result<String> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;

        if let Some(tf) = tokens_file::load_tokens()?
            && let Some(at) = tf.valid_at(now)
        {
            debug!("using cached access token");
            return Ok(at.to_string());
        }

        if let Some(rt) = token_store::load_refresh_token(&self.user_email)? {
            info!("refreshing access token");
            match oauth::refresh_access_token(&self.client_id, self.client_secret.as_deref(), &rt)
            {
                Ok(t) => return self.persist(t, now),
                Err(e) => warn!("refresh failed: {e}, falling back to interactive auth"),
            }
        }

        info!("no usable token; running interactive PKCE auth flow");
        let t = oauth::perform_pkce_flow(
            &self.client_id,
            self.client_secret.as_deref(),
            &self.redirect_uri,
            GMAIL_READONLY_SCOPE,
        )?;
        self.persist(t, now)
    }

    fn persist(&self, t: Tokens, now: i64) -> Result<String> {
        // best-effort
        if let Some(rt) = &t.refresh_token
            && let Err(e) = token_store::save_refresh_token(&self.user_email, rt)
        {
            warn!("couldn't save refresh token to keyring: {e}");
        }

        let exp = t
            .expires_in
            .map(|s| now + s as i64)
            .unwrap_or(now + FALLBACK_LIFETIME_SECS);
        tokens_file::save_tokens(Some(&t.access_token), Some(exp))?;
        Ok(t.access_token)
    }
}
