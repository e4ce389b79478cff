//! Identity primitives.
//!
//! Users are managed by an external directory that issues HS256 access
//! tokens. This service only validates them.
//!
//! - [`jwt`] -- JWT access-token validation (and generation, for tooling and tests).

pub mod jwt;
