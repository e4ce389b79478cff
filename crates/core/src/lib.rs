//! Domain logic for the textbook donation and reservation core.
//!
//! Everything here is pure: no database or HTTP dependencies. Persistence
//! lives in `shelfshare_db`, transport in `shelfshare_api`.

pub mod barcode;
pub mod donation;
pub mod eligibility;
pub mod error;
pub mod inventory;
pub mod reservation;
pub mod roles;
pub mod sweep;
pub mod types;
