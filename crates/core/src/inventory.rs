//! Listing rules for the public inventory.
//!
//! Free-text filters are case-insensitive substring matches, so user input
//! is escaped before it reaches a `LIKE` pattern. Page sizes are clamped.

/// Default page size for inventory listing.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum page size for inventory listing.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Clamp a requested page size into `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// Negative offsets become zero.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Trim a filter value; blank values mean "no filter".
pub fn clean_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Build an `ILIKE` substring pattern with `%`, `_` and `\` escaped.
pub fn substring_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
