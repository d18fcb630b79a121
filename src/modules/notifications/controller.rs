use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{CreateNotificationDto, Notification};
use super::service::NotificationService;
use crate::middleware::auth::AuthPrincipal;
use crate::middleware::role::ensure_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Publish a notification
#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notification published", body = Notification),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin or teacher role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state, dto))]
pub async fn create_notification(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    ValidatedJson(dto): ValidatedJson<CreateNotificationDto>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    ensure_role(&principal, &[Role::Teacher])?;
    let notification =
        NotificationService::create_notification(state.store.as_ref(), &principal, dto).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Notification feed for the acting principal
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Role-scoped notification feed", body = [Notification]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<Vec<Notification>>, AppError> {
    let rows = NotificationService::list_notifications(state.store.as_ref(), &principal).await?;
    Ok(Json(rows))
}
