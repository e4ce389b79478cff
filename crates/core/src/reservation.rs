//! Reservation lifecycle rules.
//!
//! A donated item is either `Available` (in the inventory), `Held` (a hold
//! exists for exactly one requester) or `Completed` (picked up, gone for
//! good). The atomic moves between the two stores are implemented by the
//! hold repository; this module holds the rules they share: the hold TTL,
//! deadline and remaining-time arithmetic, and who may act on a hold.

use chrono::Duration;
use serde::Serialize;

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::{DbId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// How long a hold lasts before the sweeper returns the item to the pool.
pub const HOLD_TTL_DAYS: i64 = 3;

/// [`HOLD_TTL_DAYS`] as a `chrono::Duration`.
pub fn hold_ttl() -> Duration {
    Duration::days(HOLD_TTL_DAYS)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle state of one conceptual item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldState {
    Available,
    Held,
    Completed,
}

/// Why a hold went back to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseReason {
    Cancelled,
    Expired,
}

impl ReleaseReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseReason::Cancelled => "cancelled",
            ReleaseReason::Expired => "expired",
        }
    }
}

// ---------------------------------------------------------------------------
// Deadline arithmetic
// ---------------------------------------------------------------------------

/// Deadline for a hold created at `now`.
pub fn hold_deadline(now: Timestamp) -> Timestamp {
    now + hold_ttl()
}

/// Time left on a hold, clamped at zero.
pub fn remaining(expires_at: Timestamp, now: Timestamp) -> Duration {
    let left = expires_at - now;
    if left < Duration::zero() {
        Duration::zero()
    } else {
        left
    }
}

/// A hold is expired once its deadline is at or before `now`.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    expires_at <= now
}

/// Human-readable remaining time for display.
///
/// `"expired"` at zero, `"{m} minutes"` under an hour, otherwise
/// `"{h} hours {m} minutes"`.
pub fn format_remaining(left: Duration) -> String {
    if left <= Duration::zero() {
        return "expired".to_string();
    }
    let hours = left.num_hours();
    let minutes = left.num_minutes() % 60;
    if hours > 0 {
        format!("{hours} hours {minutes} minutes")
    } else {
        format!("{minutes} minutes")
    }
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

/// A user may not hold their own donation.
pub fn ensure_not_self(item_id: DbId, owner_id: UserId, holder_id: UserId) -> Result<(), CoreError> {
    if owner_id == holder_id {
        Err(CoreError::SelfReservationDenied { item_id })
    } else {
        Ok(())
    }
}

/// Who is asking to act on a hold, relative to that hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldParty {
    pub owner_id: UserId,
    pub holder_id: UserId,
}

impl HoldParty {
    fn is_admin(role: &str) -> bool {
        role == ROLE_ADMIN
    }

    /// Only the holder (or an admin) may confirm pickup.
    pub fn ensure_can_confirm(&self, caller: UserId, role: &str) -> Result<(), CoreError> {
        if caller == self.holder_id || Self::is_admin(role) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the holder can confirm this hold".into(),
            ))
        }
    }

    /// The holder, the donor or an admin may cancel.
    pub fn ensure_can_cancel(&self, caller: UserId, role: &str) -> Result<(), CoreError> {
        if self.involves(caller) || Self::is_admin(role) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the holder or the donor can cancel this hold".into(),
            ))
        }
    }

    /// The holder, the donor or an admin may see the hold and its parties.
    pub fn ensure_can_view(&self, caller: UserId, role: &str) -> Result<(), CoreError> {
        if self.involves(caller) || Self::is_admin(role) {
            Ok(())
        } else {
            Err(CoreError::Forbidden("Not a party to this hold".into()))
        }
    }

    pub fn involves(&self, user: UserId) -> bool {
        user == self.owner_id || user == self.holder_id
    }
}
