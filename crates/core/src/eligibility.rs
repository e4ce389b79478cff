//! Eligibility decision for donated textbooks.
//!
//! A donation may enter the public pool only when its normalized barcode
//! matches an entry in the approved catalog. The lookup itself lives in the
//! repository layer; this module only shapes the outcome.

use serde::Serialize;

use crate::error::CoreError;

/// Canonical title data taken from a matching catalog entry.
///
/// Used to pre-fill a donation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApprovedTitle {
    pub title: String,
    pub author: String,
    pub grade: String,
    pub subject: Option<String>,
}

/// Outcome of checking a barcode against the approved catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Approved(ApprovedTitle),
    NotApproved,
}

/// Wire shape of an eligibility check: `{ "approved": false }` or
/// `{ "approved": true, "title": ..., "author": ..., ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityView {
    pub approved: bool,
    pub barcode_key: String,
    #[serde(flatten)]
    pub entry: Option<ApprovedTitle>,
}

impl Eligibility {
    /// First catalog hit wins; no hit means not approved.
    pub fn decide(hit: Option<ApprovedTitle>) -> Self {
        match hit {
            Some(title) => Self::Approved(title),
            None => Self::NotApproved,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved(_))
    }

    /// Convert into the approved title, or [`CoreError::NotEligible`].
    ///
    /// Donation intake uses this so a rejected barcode never reaches the
    /// inventory.
    pub fn require_approved(self, barcode_key: &str) -> Result<ApprovedTitle, CoreError> {
        match self {
            Self::Approved(title) => Ok(title),
            Self::NotApproved => Err(CoreError::NotEligible {
                barcode_key: barcode_key.to_string(),
            }),
        }
    }

    pub fn into_view(self, barcode_key: String) -> EligibilityView {
        match self {
            Self::Approved(entry) => EligibilityView {
                approved: true,
                barcode_key,
                entry: Some(entry),
            },
            Self::NotApproved => EligibilityView {
                approved: false,
                barcode_key,
                entry: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn algebra() -> ApprovedTitle {
        ApprovedTitle {
            title: "Algebra 1".to_string(),
            author: "Levi".to_string(),
            grade: "7".to_string(),
            subject: Some("math".to_string()),
        }
    }

    #[test]
    fn hit_is_approved() {
        let outcome = Eligibility::decide(Some(algebra()));
        assert!(outcome.is_approved());
        assert_eq!(outcome.require_approved("123").unwrap(), algebra());
    }

    #[test]
    fn miss_is_rejected_with_key() {
        let outcome = Eligibility::decide(None);
        assert!(!outcome.is_approved());
        assert_matches!(
            outcome.require_approved("12345678"),
            Err(CoreError::NotEligible { barcode_key }) if barcode_key == "12345678"
        );
    }

    #[test]
    fn rejected_view_only_carries_flag_and_key() {
        let json = serde_json::to_value(Eligibility::NotApproved.into_view("42".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "approved": false, "barcode_key": "42" }));
    }

    #[test]
    fn approved_view_flattens_title_fields() {
        let json =
            serde_json::to_value(Eligibility::Approved(algebra()).into_view("42".into())).unwrap();
        assert_eq!(json["approved"], true);
        assert_eq!(json["title"], "Algebra 1");
        assert_eq!(json["author"], "Levi");
        assert_eq!(json["grade"], "7");
        assert_eq!(json["subject"], "math");
    }
}
