use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{
    CreateStudentDto, PaginatedStudentsResponse, StudentDetail, StudentProfile,
    UpdateStudentContactDto,
};
use super::service::StudentService;
use crate::middleware::auth::AuthPrincipal;
use crate::middleware::role::ensure_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use crate::validator::ValidatedJson;

/// Create a student profile
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student profile created", body = StudentProfile),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<StudentProfile>), AppError> {
    let profile = StudentService::create_student(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// List student profiles
#[utoipa::path(
    get,
    path = "/api/students",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated students", body = PaginatedStudentsResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let response = StudentService::list_students(state.store.as_ref(), params).await?;
    Ok(Json(response))
}

/// The acting student's own profile
#[utoipa::path(
    get,
    path = "/api/students/me",
    responses(
        (status = 200, description = "Own profile", body = StudentDetail),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 404, description = "Student profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn my_profile(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<StudentDetail>, AppError> {
    ensure_role(&principal, &[Role::Student])?;
    let detail = StudentService::my_profile(state.store.as_ref(), &principal).await?;
    Ok(Json(detail))
}

/// Update contact fields on the acting student's own profile
#[utoipa::path(
    put,
    path = "/api/students/me",
    request_body = UpdateStudentContactDto,
    responses(
        (status = 200, description = "Profile updated", body = StudentProfile),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 404, description = "Student profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_my_contact(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    ValidatedJson(dto): ValidatedJson<UpdateStudentContactDto>,
) -> Result<Json<StudentProfile>, AppError> {
    ensure_role(&principal, &[Role::Student])?;
    let profile = StudentService::update_my_contact(state.store.as_ref(), &principal, dto).await?;
    Ok(Json(profile))
}
