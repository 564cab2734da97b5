use crate::domain::email::Header;

pub const DEFAULT_SUBJECT: &str = "(No Subject)";
pub const DEFAULT_SENDER: &str = "(Unknown Sender)";

/// First header named exactly `name`.
pub fn header_value<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
}

pub fn subject(headers: &[Header]) -> String {
    header_value(headers, "Subject")
        .map(decode_mime_words)
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string())
}

pub fn sender(headers: &[Header]) -> String {
    header_value(headers, "From")
        .map(decode_mime_words)
        .unwrap_or_else(|| DEFAULT_SENDER.to_string())
}

/// Decode RFC 2047 encoded-words (`=?UTF-8?B?...?=`) that occasionally
/// survive in API header values. Anything else passes through untouched.
pub fn decode_mime_words(raw: &str) -> String {
    if !raw.contains("=?") {
        return raw.to_string();
    }

    // mailparse expects a full "Key: value" header line
    let mut line = b"X: ".to_vec();
    line.extend_from_slice(raw.as_bytes());
    line.extend_from_slice(b"\r\n");

    match mailparse::parse_header(&line) {
        Ok((h, _idx)) => h.get_value(),
        Err(_) => raw.to_string(),
    }
}
