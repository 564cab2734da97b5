use crate::domain::email::Payload;
use crate::mail::sanitize::sanitize;

pub const MIME_PLAIN: &str = "text/plain";
pub const MIME_HTML: &str = "text/html";

/// Sentences kept in a preview.
pub const PREVIEW_SENTENCES: usize = 5;

/// Pick the best text representation of a payload and clean it.
///
/// Returns `(full_body, preview)`. Multipart payloads are scanned one level
/// deep: the first `text/plain` child carrying inline data wins, else the first
/// `text/html` one. Nested multipart children are not descended into.
pub fn extract(payload: &Payload) -> (String, String) {
    let full_body = match &payload.parts {
        Some(parts) => body_from_parts(parts),
        None => payload
            .data()
            .map(|data| sanitize(data, is_mime(&payload.mime_type, MIME_HTML)))
            .unwrap_or_default(),
    };

    let preview = preview(&full_body);
    (full_body, preview)
}

fn body_from_parts(parts: &[Payload]) -> String {
    if let Some(data) = first_data_of(parts, MIME_PLAIN) {
        return sanitize(data, false);
    }
    if let Some(data) = first_data_of(parts, MIME_HTML) {
        return sanitize(data, true);
    }
    String::new()
}

fn first_data_of<'a>(parts: &'a [Payload], mime: &str) -> Option<&'a str> {
    parts
        .iter()
        .filter(|p| is_mime(&p.mime_type, mime))
        .find_map(Payload::data)
}

fn is_mime(actual: &str, wanted: &str) -> bool {
    actual.trim().eq_ignore_ascii_case(wanted)
}

/// First [`PREVIEW_SENTENCES`] sentences of `body`, joined by single spaces.
pub fn preview(body: &str) -> String {
    split_sentences(body)
        .into_iter()
        .take(PREVIEW_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Split after `.`, `?` or `!` when followed by whitespace; the whitespace
/// run itself is dropped. Always yields at least one (possibly empty) piece.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '?' | '!')) {
            out.push(&text[start..i]);

            let mut end = i + c.len_utf8();
            while let Some(&(j, w)) = chars.peek() {
                if !w.is_whitespace() {
                    break;
                }
                end = j + w.len_utf8();
                chars.next();
            }
            start = end;
            prev = Some(' ');
            continue;
        }
        prev = Some(c);
    }

    out.push(&text[start..]);
    out
}
