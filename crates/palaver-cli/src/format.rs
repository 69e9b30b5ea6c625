//! Display helpers for terminal output.

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Render a server timestamp as a short readable date.
///
/// The platform emits ISO-8601 with or without an offset; anything else
/// passes through unchanged.
pub fn date(ts: &str) -> String {
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(ts) {
        parsed.format("%b %d, %Y %H:%M").to_string()
    } else if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f") {
        naive.format("%b %d, %Y %H:%M").to_string()
    } else {
        ts.to_string()
    }
}
