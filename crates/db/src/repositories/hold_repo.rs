//! Repository for the `holds` table and the inventory <-> hold transitions.
//!
//! Every transition that touches both tables runs in one transaction, so an
//! item is never lost between the tables nor present in both:
//!
//! - `reserve`: take the item with a conditional `DELETE ... RETURNING`,
//!   then insert the hold. The row lock taken by the delete serializes
//!   concurrent reservers; the losers see no row.
//! - `cancel` / `expire`: delete the hold, re-insert the item under its
//!   original id and owner.
//! - `confirm`: delete the hold. Terminal.

use shelfshare_core::reservation::{self, HoldState, ReleaseReason};
use shelfshare_core::types::{DbId, Timestamp, UserId};
use sqlx::PgPool;

use super::donated_item_repo::{self, DonatedItemRepo};
use crate::models::donated_item::DonatedItem;
use crate::models::hold::{ExpiryCursor, Hold, ReserveOutcome, Released};

/// Column list for `holds` queries.
const COLUMNS: &str = "\
    id, source_item_id, owner_id, holder_id, title, author, grade, \
    barcode_key, condition, subject, donated_at, expires_at, created_at";

/// Provides the reservation state machine over `donated_items` and `holds`.
pub struct HoldRepo;

impl HoldRepo {
    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Move an available item into a new hold for `holder_id`.
    ///
    /// The hold expires [`reservation::HOLD_TTL_DAYS`] after `now`. A donor
    /// asking for their own item gets [`ReserveOutcome::SelfReservation`]
    /// and the item stays in the inventory.
    pub async fn reserve(
        pool: &PgPool,
        item_id: DbId,
        holder_id: UserId,
        now: Timestamp,
    ) -> Result<ReserveOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(item) = DonatedItemRepo::take(&mut tx, item_id).await? else {
            tracing::debug!(item_id, holder_id, "Reserve found no available item");
            return Ok(ReserveOutcome::NotFound);
        };

        if reservation::ensure_not_self(item.id, item.owner_id, holder_id).is_err() {
            tx.rollback().await?;
            tracing::debug!(item_id, holder_id, "Reserve rejected: holder is the donor");
            return Ok(ReserveOutcome::SelfReservation);
        }

        let query = format!(
            "INSERT INTO holds \
                (source_item_id, owner_id, holder_id, title, author, grade, \
                 barcode_key, condition, subject, donated_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let hold = sqlx::query_as::<_, Hold>(&query)
            .bind(item.id)
            .bind(item.owner_id)
            .bind(holder_id)
            .bind(&item.title)
            .bind(&item.author)
            .bind(&item.grade)
            .bind(&item.barcode_key)
            .bind(&item.condition)
            .bind(&item.subject)
            .bind(item.created_at)
            .bind(reservation::hold_deadline(now))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            hold_id = hold.id,
            item_id,
            holder_id,
            owner_id = hold.owner_id,
            expires_at = %hold.expires_at,
            "Hold created"
        );
        Ok(ReserveOutcome::Held(hold))
    }

    /// Permanently delete a hold after pickup. Returns `None` if the hold no
    /// longer exists.
    pub async fn confirm(pool: &PgPool, id: DbId) -> Result<Option<Hold>, sqlx::Error> {
        let query = format!("DELETE FROM holds WHERE id = $1 RETURNING {COLUMNS}");
        let hold = sqlx::query_as::<_, Hold>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        if let Some(ref h) = hold {
            tracing::info!(
                hold_id = h.id,
                item_id = h.source_item_id,
                holder_id = h.holder_id,
                "Hold confirmed, item completed"
            );
        }
        Ok(hold)
    }

    /// Cancel a hold and return its item to the inventory.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Released>, sqlx::Error> {
        Self::release(pool, id, None, ReleaseReason::Cancelled).await
    }

    /// Return an expired hold's item to the inventory.
    ///
    /// Only deletes the hold if `expires_at <= now`. Calling it again for the
    /// same hold returns `None`, so overlapping sweeps are harmless.
    pub async fn expire(
        pool: &PgPool,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<Released>, sqlx::Error> {
        Self::release(pool, id, Some(now), ReleaseReason::Expired).await
    }

    async fn release(
        pool: &PgPool,
        id: DbId,
        expired_by: Option<Timestamp>,
        reason: ReleaseReason,
    ) -> Result<Option<Released>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "DELETE FROM holds \
             WHERE id = $1 AND ($2::TIMESTAMPTZ IS NULL OR expires_at <= $2) \
             RETURNING {COLUMNS}"
        );
        let Some(hold) = sqlx::query_as::<_, Hold>(&query)
            .bind(id)
            .bind(expired_by)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO donated_items \
                (id, owner_id, title, author, grade, barcode_key, condition, subject, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {}",
            donated_item_repo::COLUMNS
        );
        let item = sqlx::query_as::<_, DonatedItem>(&query)
            .bind(hold.source_item_id)
            .bind(hold.owner_id)
            .bind(&hold.title)
            .bind(&hold.author)
            .bind(&hold.grade)
            .bind(&hold.barcode_key)
            .bind(&hold.condition)
            .bind(&hold.subject)
            .bind(hold.donated_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            hold_id = hold.id,
            item_id = item.id,
            owner_id = item.owner_id,
            reason = reason.as_str(),
            "Hold released, item returned to inventory"
        );
        Ok(Some(Released { hold, item }))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Find a live hold by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Hold>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM holds WHERE id = $1");
        sqlx::query_as::<_, Hold>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Holds taken by `holder_id`, soonest deadline first.
    pub async fn list_for_holder(
        pool: &PgPool,
        holder_id: UserId,
    ) -> Result<Vec<Hold>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM holds WHERE holder_id = $1 ORDER BY expires_at, id"
        );
        sqlx::query_as::<_, Hold>(&query)
            .bind(holder_id)
            .fetch_all(pool)
            .await
    }

    /// Holds on items donated by `owner_id`, soonest deadline first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: UserId,
    ) -> Result<Vec<Hold>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM holds WHERE owner_id = $1 ORDER BY expires_at, id"
        );
        sqlx::query_as::<_, Hold>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Holds whose deadline is at or before `now`, ordered by
    /// `(expires_at, id)` and starting strictly after `after`.
    ///
    /// Callers page through the expired set by passing the last entry of the
    /// previous page, so a hold that stays behind (e.g. its expiry keeps
    /// failing) is not returned again within the same scan.
    pub async fn list_expired(
        pool: &PgPool,
        now: Timestamp,
        after: Option<ExpiryCursor>,
        limit: i64,
    ) -> Result<Vec<ExpiryCursor>, sqlx::Error> {
        sqlx::query_as::<_, ExpiryCursor>(
            "SELECT id, expires_at FROM holds \
             WHERE expires_at <= $1 \
               AND ($2::TIMESTAMPTZ IS NULL OR (expires_at, id) > ($2::TIMESTAMPTZ, $3::BIGINT)) \
             ORDER BY expires_at, id \
             LIMIT $4",
        )
        .bind(now)
        .bind(after.map(|c| c.expires_at))
        .bind(after.map(|c| c.id))
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Current lifecycle state of an item, or `None` if it is in neither
    /// table (never existed, or completed).
    pub async fn item_state(
        pool: &PgPool,
        item_id: DbId,
    ) -> Result<Option<HoldState>, sqlx::Error> {
        let (available, held): (bool, bool) = sqlx::query_as(
            "SELECT \
                EXISTS (SELECT 1 FROM donated_items WHERE id = $1), \
                EXISTS (SELECT 1 FROM holds WHERE source_item_id = $1)",
        )
        .bind(item_id)
        .fetch_one(pool)
        .await?;

        Ok(match (available, held) {
            (true, _) => Some(HoldState::Available),
            (false, true) => Some(HoldState::Held),
            (false, false) => None,
        })
    }
}
