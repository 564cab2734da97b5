use std::sync::LazyLock;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use html2text::render::TrivialDecorator;
use log::debug;
use regex::Regex;

/// Gmail hands out base64url bodies both with and without `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Wide enough that html2text never wraps inside a token (a URL must stay
/// whole for the noise patterns to see it).
const HTML_RENDER_WIDTH: usize = 10_000;

/// Boilerplate removed from every body, applied one after another in this
/// order. Each entry sees the output of the ones before it.
pub const NOISE_PATTERNS: &[&str] = &[
    r"(?i)unsubscribe.*?(click here|manage preferences)?",
    r"(?i)view (entire message|online version)",
    r"(?i)follow us on.*",
    r"(?i)contact us.*",
    r"(?i)https?://\S+",
    r"(?i)\b(all rights reserved|copyright)\b",
];

static NOISE: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    NOISE_PATTERNS
        .iter()
        .map(|p| (Regex::new(p).expect("noise pattern must compile"), ""))
        .collect()
});

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("script/style pattern must compile")
});

/// Decode a base64url body and reduce it to clean single-line text.
///
/// Never fails: undecodable input (bad base64, bad UTF-8) gives `""`.
pub fn sanitize(data: &str, is_html: bool) -> String {
    let Some(decoded) = decode_base64url(data) else {
        return String::new();
    };

    let text = if is_html {
        html_to_text(&decoded)
    } else {
        decoded
    };

    let text = strip_noise(&collapse_whitespace(&text));
    // removals leave double spaces behind ("a <url> b" -> "a  b")
    collapse_whitespace(&text)
}

pub fn decode_base64url(data: &str) -> Option<String> {
    // accept the standard alphabet too
    let normalized: String = data
        .trim()
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = match URL_SAFE_LENIENT.decode(normalized.as_bytes()) {
        Ok(b) => b,
        Err(e) => {
            debug!("base64url decode failed: {e}");
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(s) => Some(s),
        Err(e) => {
            debug!("decoded body is not valid UTF-8: {e}");
            None
        }
    }
}

/// Visible text of an HTML document; tags, attributes, scripts and styles
/// dropped. No bullets, link brackets, heading marks or table borders are added.
pub fn html_to_text(html: &str) -> String {
    let html = SCRIPT_OR_STYLE.replace_all(html, " ");
    let config = html2text::config::with_decorator(TrivialDecorator::new())
        .raw_mode(true)
        .no_table_borders();
    match config.string_from_read(html.as_bytes(), HTML_RENDER_WIDTH) {
        Ok(text) => text,
        Err(e) => {
            debug!("html2text failed: {e}");
            String::new()
        }
    }
}

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn strip_noise(text: &str) -> String {
    NOISE
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}
