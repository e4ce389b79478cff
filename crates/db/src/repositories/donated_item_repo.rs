//! Repository for the `donated_items` table (the public inventory).
//!
//! Rows here are the items available for reservation. Removal happens only
//! inside the hold transitions in [`super::HoldRepo`]; the standalone
//! [`DonatedItemRepo::remove`] is the same conditional delete for callers
//! that already hold a transaction.

use shelfshare_core::inventory;
use shelfshare_core::types::{DbId, UserId};
use sqlx::{PgConnection, PgPool};

use crate::models::donated_item::{CreateDonatedItem, DonatedItem, DonatedItemFilter};

/// Column list for `donated_items` queries.
pub(crate) const COLUMNS: &str = "\
    id, owner_id, title, author, grade, barcode_key, condition, subject, created_at";

/// Provides insert, lookup, listing and removal for donated items.
pub struct DonatedItemRepo;

impl DonatedItemRepo {
    /// Insert a new donated item, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateDonatedItem,
    ) -> Result<DonatedItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO donated_items \
                (owner_id, title, author, grade, barcode_key, condition, subject) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DonatedItem>(&query)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.grade)
            .bind(&input.barcode_key)
            .bind(&input.condition)
            .bind(&input.subject)
            .fetch_one(pool)
            .await
    }

    /// Find an available item by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DonatedItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donated_items WHERE id = $1");
        sqlx::query_as::<_, DonatedItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List available items matching `filter`, newest first.
    ///
    /// Free-text fields match case-insensitively as substrings; `grade` and
    /// `condition` match exactly. Blank filter values are ignored.
    pub async fn list(
        pool: &PgPool,
        filter: &DonatedItemFilter,
    ) -> Result<Vec<DonatedItem>, sqlx::Error> {
        let title = inventory::clean_filter(filter.title.as_deref())
            .map(|v| inventory::substring_pattern(&v));
        let author = inventory::clean_filter(filter.author.as_deref())
            .map(|v| inventory::substring_pattern(&v));
        let subject = inventory::clean_filter(filter.subject.as_deref())
            .map(|v| inventory::substring_pattern(&v));
        let grade = inventory::clean_filter(filter.grade.as_deref());
        let condition = inventory::clean_filter(filter.condition.as_deref());

        let query = format!(
            "SELECT {COLUMNS} FROM donated_items \
             WHERE ($1::TEXT IS NULL OR title ILIKE $1) \
               AND ($2::TEXT IS NULL OR author ILIKE $2) \
               AND ($3::TEXT IS NULL OR subject ILIKE $3) \
               AND ($4::TEXT IS NULL OR grade = $4) \
               AND ($5::TEXT IS NULL OR condition = $5) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, DonatedItem>(&query)
            .bind(title)
            .bind(author)
            .bind(subject)
            .bind(grade)
            .bind(condition)
            .bind(inventory::clamp_limit(filter.limit))
            .bind(inventory::clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// List a donor's items that are still available.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: UserId,
    ) -> Result<Vec<DonatedItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donated_items \
             WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, DonatedItem>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Conditionally delete an item, returning the removed row.
    ///
    /// Concurrent callers serialize on the row lock: exactly one receives
    /// `Some`, the rest `None`. Idempotent.
    pub async fn take(conn: &mut PgConnection, id: DbId) -> Result<Option<DonatedItem>, sqlx::Error> {
        let query = format!("DELETE FROM donated_items WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, DonatedItem>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Delete an item. Returns `false` if it was already gone.
    pub async fn remove(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(Self::take(conn, id).await?.is_some())
    }
}
