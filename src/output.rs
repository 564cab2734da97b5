use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::domain::email::Thread;

/// Characters of preview shown per message in the console listing.
pub const PREVIEW_DISPLAY_CHARS: usize = 200;

/// Pretty JSON, UTF-8, non-ASCII kept as-is.
pub fn write_threads(path: &Path, threads: &[Thread]) -> Result<()> {
    let s = serde_json::to_string_pretty(threads)?;
    fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn read_threads(path: &Path) -> Result<Vec<Thread>> {
    let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(serde_json::from_str(&s)?)
}

pub fn render_threads(threads: &[Thread]) -> String {
    let mut out = String::new();
    for (idx, thread) in threads.iter().enumerate() {
        let _ = writeln!(out, "\nEmail {}: {}", idx + 1, thread.subject);
        for msg in &thread.messages {
            let _ = writeln!(out, "  ↳ {} | {}", msg.timestamp, msg.sender);
            let _ = writeln!(
                out,
                "     Preview: {}...",
                truncate_chars(&msg.preview, PREVIEW_DISPLAY_CHARS)
            );
        }
    }
    out
}

/// First `max` characters (not bytes) of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
