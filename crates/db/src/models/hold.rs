//! Hold (reservation) model and views.

use serde::Serialize;
use shelfshare_core::reservation::{self, HoldParty};
use shelfshare_core::types::{DbId, Timestamp, UserId};
use sqlx::FromRow;

use super::donated_item::DonatedItem;

/// A row from the `holds` table: one requester's time-bounded claim on a
/// donated item. Carries a copy of the item's descriptive fields so the item
/// can be restored exactly on cancel or expiry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hold {
    pub id: DbId,
    pub source_item_id: DbId,
    pub owner_id: UserId,
    pub holder_id: UserId,
    pub title: String,
    pub author: String,
    pub grade: String,
    pub barcode_key: String,
    pub condition: String,
    pub subject: Option<String>,
    pub donated_at: Timestamp,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

impl Hold {
    pub fn party(&self) -> HoldParty {
        HoldParty {
            owner_id: self.owner_id,
            holder_id: self.holder_id,
        }
    }

    /// Attach on-demand remaining time for display.
    pub fn into_view(self, now: Timestamp) -> HoldView {
        let left = reservation::remaining(self.expires_at, now);
        HoldView {
            expired: reservation::is_expired(self.expires_at, now),
            remaining_secs: left.num_seconds(),
            remaining_label: reservation::format_remaining(left),
            hold: self,
        }
    }
}

/// A hold plus its remaining time, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct HoldView {
    #[serde(flatten)]
    pub hold: Hold,
    /// Past the deadline but not yet reclaimed by the sweeper.
    pub expired: bool,
    pub remaining_secs: i64,
    pub remaining_label: String,
}

/// The two users a chat conversation about a hold is opened between.
#[derive(Debug, Clone, Serialize)]
pub struct HoldParticipants {
    pub hold_id: DbId,
    pub item_id: DbId,
    pub owner_id: UserId,
    pub holder_id: UserId,
}

impl From<&Hold> for HoldParticipants {
    fn from(hold: &Hold) -> Self {
        HoldParticipants {
            hold_id: hold.id,
            item_id: hold.source_item_id,
            owner_id: hold.owner_id,
            holder_id: hold.holder_id,
        }
    }
}

/// Result of an attempt to take an item out of the inventory.
#[derive(Debug, Clone)]
pub enum ReserveOutcome {
    /// The item was taken and this hold now owns it.
    Held(Hold),
    /// The item is not in the inventory (held by someone else, or never
    /// existed).
    NotFound,
    /// The requester donated the item; nothing changed.
    SelfReservation,
}

/// Position of a hold in the expiry scan order `(expires_at, id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct ExpiryCursor {
    pub id: DbId,
    pub expires_at: Timestamp,
}

/// Result of returning a hold's item to the inventory.
#[derive(Debug, Clone)]
pub struct Released {
    pub hold: Hold,
    pub item: DonatedItem,
}
