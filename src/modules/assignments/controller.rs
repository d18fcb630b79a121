use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::instrument;
use uuid::Uuid;

use super::model::{Assignment, AssignmentDetail, CreateAssignmentDto, StudentAssignmentView};
use super::service::{AssignmentListing, AssignmentService};
use crate::middleware::auth::AuthPrincipal;
use crate::middleware::role::ensure_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::submissions::model::SubmissionDetail;
use crate::modules::submissions::service::SubmissionService;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Create an assignment
#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentDto,
    responses(
        (status = 201, description = "Assignment created", body = Assignment),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Not the course's teacher", body = ErrorResponse),
        (status = 404, description = "Course or profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, dto))]
pub async fn create_assignment(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    ValidatedJson(dto): ValidatedJson<CreateAssignmentDto>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    ensure_role(&principal, &[Role::Teacher])?;
    let assignment =
        AssignmentService::create_assignment(state.store.as_ref(), &principal, dto).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// List assignments visible to the acting principal
#[utoipa::path(
    get,
    path = "/api/assignments",
    responses(
        (status = 200, description = "Created-by-self for teachers, all for admins", body = [AssignmentDetail]),
        (status = 200, description = "Section view with submission status for students", body = [StudentAssignmentView]),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn list_assignments(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Response, AppError> {
    let listing = AssignmentService::list_assignments(state.store.as_ref(), &principal).await?;
    Ok(match listing {
        AssignmentListing::Teacher(rows) => Json(rows).into_response(),
        AssignmentListing::Student(rows) => Json(rows).into_response(),
    })
}

/// Submissions received for an assignment
#[utoipa::path(
    get,
    path = "/api/assignments/{id}/submissions",
    params(("id" = Uuid, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Submissions with student identities", body = [SubmissionDetail]),
        (status = 403, description = "Assignment created by another teacher", body = ErrorResponse),
        (status = 404, description = "Assignment or profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn assignment_submissions(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SubmissionDetail>>, AppError> {
    ensure_role(&principal, &[Role::Teacher])?;
    let rows =
        SubmissionService::submissions_for_assignment(state.store.as_ref(), &principal, id).await?;
    Ok(Json(rows))
}
