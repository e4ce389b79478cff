//! Barcode normalization for matching against the approved catalog.
//!
//! Scanned and typed barcodes arrive with spaces, hyphens and a trailing
//! check digit. The catalog was keyed with a blunt transform that also drops
//! every `0` digit, not only leading zeros. The transform is reproduced
//! exactly here: changing it would silently break matching against keys that
//! were already normalized this way.

/// Normalized keys of at least this many characters lose their last
/// character (treated as a check digit).
pub const CHECK_DIGIT_MIN_LEN: usize = 10;

/// One way of looking up a normalized key in the catalog.
///
/// The catalog may hold a key as a number or as a string, so a lookup is a
/// sequence of these, tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogKey {
    Numeric(i64),
    Text(String),
}

/// Canonicalize a raw barcode into a catalog key.
///
/// 1. Strip all whitespace and `-` characters.
/// 2. Remove every `0` from what remains.
/// 3. If the result has [`CHECK_DIGIT_MIN_LEN`] or more characters, drop the
///    last one.
///
/// Total over any input; never fails.
pub fn normalize(raw: &str) -> String {
    let cleaned: Vec<char> = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .filter(|c| *c != '0')
        .collect();

    let keep = if cleaned.len() >= CHECK_DIGIT_MIN_LEN {
        cleaned.len() - 1
    } else {
        cleaned.len()
    };

    cleaned[..keep].iter().collect()
}

/// Numeric interpretation of a normalized key.
///
/// `Some` only for a non-empty, all-ASCII-digit key that fits in an `i64`.
pub fn numeric_key(key: &str) -> Option<i64> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Ordered lookup plan for a raw barcode: numeric form first (when the key
/// has one), string form second.
pub fn lookup_keys(raw: &str) -> Vec<CatalogKey> {
    let key = normalize(raw);
    let mut keys = Vec::with_capacity(2);
    if let Some(n) = numeric_key(&key) {
        keys.push(CatalogKey::Numeric(n));
    }
    keys.push(CatalogKey::Text(key));
    keys
}
