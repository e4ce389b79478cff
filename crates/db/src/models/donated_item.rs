//! Donated item model and DTOs.

use serde::{Deserialize, Serialize};
use shelfshare_core::types::{DbId, Timestamp, UserId};
use sqlx::FromRow;

/// A row from the `donated_items` table: a book available for reservation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DonatedItem {
    pub id: DbId,
    pub owner_id: UserId,
    pub title: String,
    pub author: String,
    pub grade: String,
    pub barcode_key: String,
    pub condition: String,
    pub subject: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a donated item that already passed the eligibility gate.
#[derive(Debug, Clone)]
pub struct CreateDonatedItem {
    pub owner_id: UserId,
    pub title: String,
    pub author: String,
    pub grade: String,
    pub barcode_key: String,
    pub condition: String,
    pub subject: Option<String>,
}

/// Query parameters for `GET /api/v1/donations`.
///
/// `title`, `author` and `subject` are case-insensitive substring matches;
/// `grade` and `condition` match exactly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonatedItemFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub condition: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /api/v1/donations`.
///
/// `title`, `author` and `grade` are optional overrides of the catalog
/// values; blank strings count as absent.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDonation {
    pub barcode: String,
    pub condition: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub grade: Option<String>,
}
