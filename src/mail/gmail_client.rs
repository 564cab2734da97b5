use anyhow::{Result, anyhow, bail};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::email::{RawMessage, Thread};
use crate::mail::threads::threads_from_raw;

pub const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

#[derive(Debug, Clone, Deserialize)]
pub struct MessageRef {
    pub id: String,
    #[serde(rename = "threadId", default)]
    pub thread_id: String,
}

#[derive(Debug, Deserialize)]
struct ListMessagesResponse {
    #[serde(default)]
    messages: Option<Vec<MessageRef>>,
}

pub struct GmailClient {
    base_url: String,
    http: Client,
}

impl GmailClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Newest messages carrying `label`, at most `max_results` of them.
    pub fn list_messages(
        &self,
        access_token: &str,
        label: &str,
        max_results: u32,
    ) -> Result<Vec<MessageRef>> {
        let url = format!("{}/messages", self.base_url);
        let max = max_results.to_string();
        let resp = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("labelIds", label), ("maxResults", max.as_str())])
            .send()?;

        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        if !status.is_success() {
            bail!("Gmail list failed: {status} ({text})");
        }

        let list: ListMessagesResponse = serde_json::from_str(&text)?;
        Ok(list.messages.unwrap_or_default())
    }

    pub fn get_message(&self, access_token: &str, id: &str) -> Result<RawMessage> {
        if id.is_empty() || id.contains('/') || id.contains('\\') || id.contains("..") {
            return Err(anyhow!("invalid message id: {id:?}"));
        }

        let url = format!("{}/messages/{}", self.base_url, id);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("format", "full")])
            .send()?;

        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        if !status.is_success() {
            bail!("Gmail get {id} failed: {status} ({text})");
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// List, fetch each message in listing order and assemble threads.
    /// A message that fails to fetch is skipped; a failed listing is an error.
    pub fn fetch_threads(
        &self,
        access_token: &str,
        label: &str,
        max_results: u32,
    ) -> Result<Vec<Thread>> {
        let refs = self.list_messages(access_token, label, max_results)?;
        info!("{} messages listed under {label}", refs.len());

        let mut raws = Vec::with_capacity(refs.len());
        for r in &refs {
            match self.get_message(access_token, &r.id) {
                Ok(raw) => {
                    debug!("fetched {} (thread {})", raw.id, raw.thread_id);
                    raws.push(raw);
                }
                Err(e) => warn!("skipping message {}: {e}", r.id),
            }
        }

        Ok(threads_from_raw(&raws))
    }
}
