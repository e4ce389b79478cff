//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and query parameters where needed

pub mod catalog;
pub mod donated_item;
pub mod hold;
