use chrono::{DateTime, Local};
use humansize::{format_size as human_format_size, BINARY};
use unicode_width::UnicodeWidthChar;

/// Format a byte count in human-readable format (e.g. "12.5 MiB")
pub fn format_size(bytes: u64) -> String {
    human_format_size(bytes, BINARY)
}

/// Format a byte count as gigabytes with one decimal ("15.5GB")
pub fn format_gb(bytes: u64) -> String {
    format!("{:.1}GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}

/// Format an uptime in seconds as HH:MM
pub fn format_uptime(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 3600, (secs % 3600) / 60)
}

/// Format a Unix timestamp in local time (YYYY-MM-DD HH:MM)
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Cut `text` to at most `max_width` terminal columns.
///
/// Works on characters, so multi-byte and wide glyphs are never split.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::with_capacity(text.len().min(max_width * 4));
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}
