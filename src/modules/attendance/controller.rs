use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use super::model::{
    Attendance, AttendanceQuery, CourseAttendanceRow, MarkAttendanceDto, StudentAttendanceRow,
};
use super::service::{AttendanceListing, AttendanceService};
use crate::middleware::auth::AuthPrincipal;
use crate::middleware::role::ensure_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Mark attendance for a student
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendanceDto,
    responses(
        (status = 200, description = "Attendance recorded", body = Attendance),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Not the course's teacher", body = ErrorResponse),
        (status = 404, description = "Course, student, or profile not found", body = ErrorResponse),
        (status = 409, description = "Already marked by another teacher", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    ValidatedJson(dto): ValidatedJson<MarkAttendanceDto>,
) -> Result<(StatusCode, Json<Attendance>), AppError> {
    ensure_role(&principal, &[Role::Teacher])?;
    let record = AttendanceService::mark_attendance(state.store.as_ref(), &principal, dto).await?;
    Ok((StatusCode::OK, Json(record)))
}

/// List attendance visible to the acting principal
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Own records for students", body = [StudentAttendanceRow]),
        (status = 200, description = "Course register for teachers and admins", body = [CourseAttendanceRow]),
        (status = 400, description = "Missing course_id", body = ErrorResponse),
        (status = 403, description = "Not the course's teacher", body = ErrorResponse),
        (status = 404, description = "Profile or course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn list_attendance(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(query): Query<AttendanceQuery>,
) -> Result<Response, AppError> {
    let listing =
        AttendanceService::list_attendance(state.store.as_ref(), &principal, query).await?;
    Ok(match listing {
        AttendanceListing::Student(rows) => Json(rows).into_response(),
        AttendanceListing::Course(rows) => Json(rows).into_response(),
    })
}
