use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use super::model::{Course, CourseDetail, CreateCourseDto};
use super::service::CourseService;
use crate::middleware::auth::AuthPrincipal;
use crate::middleware::role::ensure_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::StudentDetail;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    ensure_role(&principal, &[])?;
    let course = CourseService::create_course(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// List courses visible to the acting principal
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Role-scoped course list", body = [CourseDetail]),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<Vec<CourseDetail>>, AppError> {
    let courses = CourseService::list_courses(state.store.as_ref(), &principal).await?;
    Ok(Json(courses))
}

/// Roster of a course's class section
#[utoipa::path(
    get,
    path = "/api/courses/{id}/students",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Students of the course's section", body = [StudentDetail]),
        (status = 403, description = "Course owned by another teacher", body = ErrorResponse),
        (status = 404, description = "Course or profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn course_students(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StudentDetail>>, AppError> {
    ensure_role(&principal, &[Role::Teacher])?;
    let students = CourseService::course_students(state.store.as_ref(), &principal, id).await?;
    Ok(Json(students))
}
