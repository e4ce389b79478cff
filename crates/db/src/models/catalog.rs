//! Approved catalog entry model (read-only reference data).

use serde::Serialize;
use shelfshare_core::eligibility::ApprovedTitle;
use shelfshare_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `approved_catalog` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogEntry {
    pub id: DbId,
    pub barcode_number: Option<i64>,
    pub barcode_text: Option<String>,
    pub title: String,
    pub author: String,
    pub grade: String,
    pub subject: Option<String>,
    pub publisher: Option<String>,
    pub approval_number: Option<i64>,
    pub created_at: Timestamp,
}

impl From<CatalogEntry> for ApprovedTitle {
    fn from(entry: CatalogEntry) -> Self {
        ApprovedTitle {
            title: entry.title,
            author: entry.author,
            grade: entry.grade,
            subject: entry.subject,
        }
    }
}
