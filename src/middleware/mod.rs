//! Request middleware and extractors.
//!
//! - [`auth`]: the [`auth::AuthPrincipal`] extractor that turns a JWT into
//!   a typed principal
//! - [`role`]: role gates applied as router layers, plus helpers for
//!   in-handler role checks
//!
//! Authentication flow:
//!
//! 1. Client sends `Authorization: Bearer <token>` or the `token` cookie
//! 2. `AuthPrincipal` verifies the JWT and builds a [`crate::modules::auth::model::Principal`]
//! 3. A role gate on the route rejects principals outside the allowed set
//! 4. The handler shapes its queries from the principal it receives

pub mod auth;
pub mod role;
