use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{GradeSubmissionDto, SubmitAssignmentDto, Submission};
use super::service::SubmissionService;
use crate::middleware::auth::AuthPrincipal;
use crate::middleware::role::ensure_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Submit work for an assignment
#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = SubmitAssignmentDto,
    responses(
        (status = 200, description = "Submission recorded", body = Submission),
        (status = 403, description = "Assignment of another section", body = ErrorResponse),
        (status = 404, description = "Assignment or profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Submissions"
)]
#[instrument(skip(state, dto))]
pub async fn submit_assignment(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    ValidatedJson(dto): ValidatedJson<SubmitAssignmentDto>,
) -> Result<(StatusCode, Json<Submission>), AppError> {
    ensure_role(&principal, &[Role::Student])?;
    let submission = SubmissionService::submit(state.store.as_ref(), &principal, dto).await?;
    Ok((StatusCode::OK, Json(submission)))
}

/// Grade a submission
#[utoipa::path(
    put,
    path = "/api/submissions/{id}/grade",
    params(("id" = Uuid, Path, description = "Submission id")),
    request_body = GradeSubmissionDto,
    responses(
        (status = 200, description = "Submission graded", body = Submission),
        (status = 400, description = "Marks exceed the assignment total", body = ErrorResponse),
        (status = 403, description = "Assignment created by another teacher", body = ErrorResponse),
        (status = 404, description = "Submission or profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Submissions"
)]
#[instrument(skip(state, dto))]
pub async fn grade_submission(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<GradeSubmissionDto>,
) -> Result<Json<Submission>, AppError> {
    ensure_role(&principal, &[Role::Teacher])?;
    let submission = SubmissionService::grade(state.store.as_ref(), &principal, id, dto).await?;
    Ok(Json(submission))
}
