//! HTTP handlers, grouped by resource.

pub mod admin;
pub mod catalog;
pub mod donations;
pub mod holds;
