//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod catalog_repo;
pub mod donated_item_repo;
pub mod hold_repo;

pub use catalog_repo::CatalogRepo;
pub use donated_item_repo::DonatedItemRepo;
pub use hold_repo::HoldRepo;
