//! Shared utilities.
//!
//! - [`errors`]: application error taxonomy and HTTP mapping
//! - [`jwt`]: session token creation and verification
//! - [`pagination`]: request pagination helpers
//! - [`password`]: password hashing and verification
//! - [`stats`]: read-side aggregate computations

pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod stats;
