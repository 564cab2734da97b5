use serde::{Deserialize, Serialize};

pub type ThreadId = String;

/// One `{name, value}` header as the Gmail API returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Inline content of a payload node. `data` is base64url and absent for
/// attachments and multipart containers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(
        rename = "attachmentId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attachment_id: Option<String>,
}

/// A node of the message structure tree (`payload` / `payload.parts[]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payload {
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<PartBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Payload>>,
}

impl Payload {
    /// Base64url content carried inline by this node, if any.
    pub fn data(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.data.as_deref())
            .filter(|d| !d.is_empty())
    }
}

/// A message as returned by `users.messages.get?format=full`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "threadId")]
    pub thread_id: ThreadId,
    /// Epoch millis, sent by Gmail as a decimal string.
    #[serde(rename = "internalDate", default)]
    pub internal_date: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub payload: Payload,
}

impl RawMessage {
    pub fn internal_date_millis(&self) -> i64 {
        self.internal_date
            .as_deref()
            .and_then(|d| d.trim().parse::<i64>().ok())
            .unwrap_or(0)
    }
}

/// A cleaned message ready for display and persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(rename = "from")]
    pub sender: String,
    pub subject: String,
    pub timestamp: String,
    pub timestamp_raw: f64,
    pub preview: String,
    pub full_body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    #[serde(rename = "threadId")]
    pub thread_id: ThreadId,
    pub subject: String,
    pub messages: Vec<Message>,
}
