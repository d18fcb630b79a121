use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{Feedback, FeedbackDetail, SubmitFeedbackDto};
use super::service::FeedbackService;
use crate::middleware::auth::AuthPrincipal;
use crate::middleware::role::ensure_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// File feedback as the acting student
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = SubmitFeedbackDto,
    responses(
        (status = 201, description = "Feedback filed", body = Feedback),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 404, description = "Profile or course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
#[instrument(skip(state, dto))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    ValidatedJson(dto): ValidatedJson<SubmitFeedbackDto>,
) -> Result<(StatusCode, Json<Feedback>), AppError> {
    ensure_role(&principal, &[Role::Student])?;
    let feedback = FeedbackService::submit_feedback(state.store.as_ref(), &principal, dto).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// List all feedback
#[utoipa::path(
    get,
    path = "/api/feedback",
    responses(
        (status = 200, description = "All feedback with student identities", body = [FeedbackDetail]),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
#[instrument(skip(state))]
pub async fn list_feedback(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<Vec<FeedbackDetail>>, AppError> {
    ensure_role(&principal, &[])?;
    let rows = FeedbackService::list_feedback(state.store.as_ref()).await?;
    Ok(Json(rows))
}
