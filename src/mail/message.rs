use chrono::{DateTime, Local, TimeZone};

use crate::domain::email::{Message, RawMessage};
use crate::mail::extract::extract;
use crate::mail::headers;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Turn one fetched message into its cleaned form. Infallible: missing
/// headers, bodies or dates fall back to defaults.
pub fn build_message(raw: &RawMessage) -> Message {
    let headers = &raw.payload.headers;
    let millis = raw.internal_date_millis();
    let (full_body, preview) = extract(&raw.payload);

    Message {
        sender: headers::sender(headers),
        subject: headers::subject(headers),
        timestamp: format_timestamp(millis),
        timestamp_raw: millis as f64 / 1000.0,
        preview,
        full_body,
    }
}

/// Local-time display form of an epoch-millis timestamp.
pub fn format_timestamp(millis: i64) -> String {
    format_timestamp_in(millis, &Local)
}

pub fn format_timestamp_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp_millis(millis)
        .map(|utc| utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::email::{Header, PartBody, Payload};
    use crate::mail::headers::{DEFAULT_SENDER, DEFAULT_SUBJECT};
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE;
    use chrono::Utc;

    #[test]
    fn builds_from_full_message() {
        let raw = RawMessage {
            id: "m1".into(),
            thread_id: "t1".into(),
            internal_date: Some("1700000000123".into()),
            snippet: None,
            payload: Payload {
                mime_type: "text/plain".into(),
                headers: vec![
                    Header {
                        name: "From".into(),
                        value: "Bo <bo@example.com>".into(),
                    },
                    Header {
                        name: "Subject".into(),
                        value: "Lunch?".into(),
                    },
                ],
                body: Some(PartBody {
                    data: Some(URL_SAFE.encode("Noon works.\nSee you there!")),
                    size: 26,
                    attachment_id: None,
                }),
                parts: None,
            },
        };

        let m = build_message(&raw);
        assert_eq!(m.sender, "Bo <bo@example.com>");
        assert_eq!(m.subject, "Lunch?");
        assert_eq!(m.timestamp_raw, 1_700_000_000.123);
        assert_eq!(m.full_body, "Noon works. See you there!");
        assert_eq!(m.preview, "Noon works. See you there!");
        assert!(!m.timestamp.is_empty());
    }

    #[test]
    fn empty_message_uses_defaults() {
        let raw = RawMessage {
            id: "m2".into(),
            thread_id: "t2".into(),
            internal_date: Some("not a number".into()),
            snippet: None,
            payload: Payload::default(),
        };

        let m = build_message(&raw);
        assert_eq!(m.sender, DEFAULT_SENDER);
        assert_eq!(m.subject, DEFAULT_SUBJECT);
        assert_eq!(m.timestamp_raw, 0.0);
        assert_eq!(m.full_body, "");
        assert_eq!(m.preview, "");
    }

    #[test]
    fn timestamp_format_in_utc() {
        assert_eq!(format_timestamp_in(0, &Utc), "1970-01-01 00:00");
        assert_eq!(format_timestamp_in(1_700_000_000_123, &Utc), "2023-11-14 22:13");
    }
}
