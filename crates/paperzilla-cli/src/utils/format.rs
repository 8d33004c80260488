/// Placeholder shown for missing values
pub const MISSING: &str = "—";

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None or empty
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Format an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`.
/// Other non-empty values are shown unchanged.
pub fn format_timestamp(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        None => MISSING.to_string(),
        Some(ts) => match chrono::DateTime::parse_from_rfc3339(ts) {
            Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            Err(_) => ts.to_string(),
        },
    }
}
