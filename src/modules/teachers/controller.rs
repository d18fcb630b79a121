use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{CreateTeacherDto, PaginatedTeachersResponse, TeacherProfile};
use super::service::TeacherService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use crate::validator::ValidatedJson;

/// Create a teacher profile
#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher profile created", body = TeacherProfile),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<TeacherProfile>), AppError> {
    let profile = TeacherService::create_teacher(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// List teacher profiles
#[utoipa::path(
    get,
    path = "/api/teachers",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated teachers", body = PaginatedTeachersResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn list_teachers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedTeachersResponse>, AppError> {
    let response = TeacherService::list_teachers(state.store.as_ref(), params).await?;
    Ok(Json(response))
}
