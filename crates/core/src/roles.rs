//! Well-known role name constants.
//!
//! Roles arrive in the `role` claim of tokens issued by the user directory.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
