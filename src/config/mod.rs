//! Environment-driven configuration.
//!
//! Each submodule owns one aspect of configuration, loaded from environment
//! variables with sensible development defaults.
//!
//! - [`cors`]: allowed origins for the dashboard frontends
//! - [`database`]: PostgreSQL connection pool
//! - [`jwt`]: session token secret and expiry

pub mod cors;
pub mod database;
pub mod jwt;
