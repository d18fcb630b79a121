use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::modules::auth::model::Principal;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that authenticates the request and yields the typed principal.
///
/// The token is read from the `Authorization: Bearer` header first, then
/// from the `token` cookie set at login. A missing token and an invalid
/// token are distinct failures; both map to 401.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn cookie_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get("token")
        .map(|cookie| cookie.value().to_string())
}

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| AppError::unauthenticated("Authentication required"))?;

        let claims = verify_token(&token, &state.jwt_config)?;
        let principal = Principal::from_claims(&claims)?;

        Ok(AuthPrincipal(principal))
    }
}
