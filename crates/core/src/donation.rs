//! Donation intake rules.
//!
//! Validates what a donor submits and merges it with the canonical catalog
//! data before the item is written to the inventory.

use crate::barcode;
use crate::eligibility::ApprovedTitle;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CONDITION_POOR: &str = "poor";
pub const CONDITION_FAIR: &str = "fair";
pub const CONDITION_GOOD: &str = "good";

/// Accepted physical condition values.
pub const VALID_CONDITIONS: &[&str] = &[CONDITION_POOR, CONDITION_FAIR, CONDITION_GOOD];

/// Upper bound on any free-text donation field.
pub const MAX_FIELD_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a raw barcode and return its normalized key.
///
/// Rejects input that is blank or normalizes to an empty key.
pub fn validate_barcode(raw: &str) -> Result<String, CoreError> {
    if raw.trim().is_empty() {
        return Err(CoreError::Validation("barcode is required".into()));
    }
    let key = barcode::normalize(raw);
    if key.is_empty() {
        return Err(CoreError::Validation(format!(
            "barcode '{raw}' has no usable digits"
        )));
    }
    Ok(key)
}

/// Validate that `condition` is one of [`VALID_CONDITIONS`].
pub fn validate_condition(condition: &str) -> Result<(), CoreError> {
    if VALID_CONDITIONS.contains(&condition) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid condition '{condition}'. Must be one of: {}",
            VALID_CONDITIONS.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Field resolution
// ---------------------------------------------------------------------------

/// Descriptive fields of a donation after merging with the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationFields {
    pub title: String,
    pub author: String,
    pub grade: String,
    pub subject: Option<String>,
}

/// Merge donor-supplied overrides onto the catalog's canonical fields.
///
/// Non-blank overrides win (trimmed). The subject always comes from the
/// catalog. Every resulting required field must be non-empty and within
/// [`MAX_FIELD_LEN`].
pub fn resolve_fields(
    approved: ApprovedTitle,
    title: Option<&str>,
    author: Option<&str>,
    grade: Option<&str>,
) -> Result<DonationFields, CoreError> {
    let fields = DonationFields {
        title: pick(title, approved.title),
        author: pick(author, approved.author),
        grade: pick(grade, approved.grade),
        subject: approved.subject.filter(|s| !s.trim().is_empty()),
    };

    require_field("title", &fields.title)?;
    require_field("author", &fields.author)?;
    require_field("grade", &fields.grade)?;
    Ok(fields)
}

fn pick(override_value: Option<&str>, canonical: String) -> String {
    match override_value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => canonical.trim().to_string(),
    }
}

fn require_field(name: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{name} is required")));
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(CoreError::Validation(format!(
            "{name} must be at most {MAX_FIELD_LEN} characters"
        )));
    }
    Ok(())
}
