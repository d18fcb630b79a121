use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use super::model::{CourseMarkRow, EnterMarkDto, Mark, MarkReportRow, MarksQuery, StudentMarkView};
use super::service::{MarkListing, MarkService};
use crate::middleware::auth::AuthPrincipal;
use crate::middleware::role::ensure_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Enter an exam mark
#[utoipa::path(
    post,
    path = "/api/marks",
    request_body = EnterMarkDto,
    responses(
        (status = 201, description = "Mark recorded", body = Mark),
        (status = 400, description = "Out-of-range marks or wrong section", body = ErrorResponse),
        (status = 403, description = "Not the course's teacher", body = ErrorResponse),
        (status = 404, description = "Course, student, or profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Marks"
)]
#[instrument(skip(state, dto))]
pub async fn enter_mark(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    ValidatedJson(dto): ValidatedJson<EnterMarkDto>,
) -> Result<(StatusCode, Json<Mark>), AppError> {
    ensure_role(&principal, &[Role::Teacher])?;
    let mark = MarkService::enter_mark(state.store.as_ref(), &principal, dto).await?;
    Ok((StatusCode::CREATED, Json(mark)))
}

/// List marks visible to the acting principal
#[utoipa::path(
    get,
    path = "/api/marks",
    params(MarksQuery),
    responses(
        (status = 200, description = "Recent marks across the school, for admins", body = [MarkReportRow]),
        (status = 200, description = "One owned course's marks, for teachers", body = [CourseMarkRow]),
        (status = 200, description = "Own marks with percentages, for students", body = [StudentMarkView]),
        (status = 400, description = "Missing course_id", body = ErrorResponse),
        (status = 403, description = "Not the course's teacher", body = ErrorResponse),
        (status = 404, description = "Profile or course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Marks"
)]
#[instrument(skip(state))]
pub async fn list_marks(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Query(query): Query<MarksQuery>,
) -> Result<Response, AppError> {
    let listing = MarkService::list_marks(state.store.as_ref(), &principal, query).await?;
    Ok(match listing {
        MarkListing::Report(rows) => Json(rows).into_response(),
        MarkListing::Course(rows) => Json(rows).into_response(),
        MarkListing::Student(rows) => Json(rows).into_response(),
    })
}
