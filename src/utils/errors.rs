//! Application error type and HTTP mapping.
//!
//! Every failure a request can hit maps to exactly one variant, and every
//! variant maps to exactly one HTTP status. Errors are terminal for the
//! current request; nothing is retried internally.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug)]
pub enum AppError {
    /// No token was presented with the request (401).
    Unauthenticated(String),
    /// A token was presented but is malformed, expired, or has a bad
    /// signature (401).
    InvalidToken(String),
    /// Valid principal, disallowed role or resource (403).
    Forbidden(String),
    /// The principal has no matching student/teacher profile row (404).
    ProfileNotFound(String),
    /// A referenced entity does not exist (404).
    NotFound(String),
    /// Malformed or out-of-range input (400).
    Validation(String),
    /// Upsert key collision across writer contexts (409).
    Conflict(String),
    /// Storage collaborator failure, surfaced opaquely (500).
    Storage(anyhow::Error),
}

impl AppError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn profile_not_found(msg: impl Into<String>) -> Self {
        Self::ProfileNotFound(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Storage(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) | AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ProfileNotFound(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Unauthenticated(msg)
            | AppError::InvalidToken(msg)
            | AppError::Forbidden(msg)
            | AppError::ProfileNotFound(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Storage(err) => {
                // Logged with detail, surfaced without it.
                tracing::error!(error = %err, "storage collaborator failure");
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Storage(err.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::unauthenticated("no token").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::invalid_token("expired").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::forbidden("nope").status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::profile_not_found("no profile").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::not_found("missing").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::validation("bad input").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::conflict("collision").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::storage(anyhow::anyhow!("db down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_detail_not_leaked() {
        let response =
            AppError::storage(anyhow::anyhow!("connection refused on 10.0.0.3")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
