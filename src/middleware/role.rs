//! Role gates.
//!
//! Applied as router layers with `middleware::from_fn_with_state`; the gate
//! authenticates the request and rejects principals whose role is outside
//! the allowed set. Admin passes every gate.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};

use crate::middleware::auth::AuthPrincipal;
use crate::modules::auth::model::Principal;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub async fn require_roles(
    state: AppState,
    req: Request,
    next: Next,
    allowed: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let AuthPrincipal(principal) = AuthPrincipal::from_request_parts(&mut parts, &state).await?;

    ensure_role(&principal, allowed)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Gate for admin-only routes.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[]).await
}

/// Gate for routes teachers operate and admins may also reach.
pub async fn require_teacher(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[Role::Teacher]).await
}

/// In-handler role check for routes whose behavior branches by role but
/// which still exclude some roles entirely.
pub fn ensure_role(principal: &Principal, allowed: &[Role]) -> Result<(), AppError> {
    if principal.role.permits(allowed) {
        Ok(())
    } else {
        Err(AppError::forbidden("Access denied for this role"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn principal(role: Role) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            role,
            full_name: "Test Principal".to_string(),
        }
    }

    #[test]
    fn test_admin_passes_empty_allow_list() {
        assert!(ensure_role(&principal(Role::Admin), &[]).is_ok());
    }

    #[test]
    fn test_student_rejected_from_teacher_gate() {
        let err = ensure_role(&principal(Role::Student), &[Role::Teacher]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_teacher_passes_teacher_gate() {
        assert!(ensure_role(&principal(Role::Teacher), &[Role::Teacher]).is_ok());
    }
}
