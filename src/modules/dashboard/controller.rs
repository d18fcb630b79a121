use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use super::model::{AdminDashboard, StudentDashboard, TeacherDashboard};
use super::service::{Dashboard, DashboardService};
use crate::middleware::auth::AuthPrincipal;
use crate::modules::attendance::model::AttendanceReportRow;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::marks::model::MarkReportRow;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Dashboard for the acting principal
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "School-wide counters, for admins", body = AdminDashboard),
        (status = 200, description = "Own courses and assignments, for teachers", body = TeacherDashboard),
        (status = 200, description = "Own attendance, pending work, and recent marks, for students", body = StudentDashboard),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Response, AppError> {
    let payload = DashboardService::dashboard(state.store.as_ref(), &principal).await?;
    Ok(match payload {
        Dashboard::Admin(d) => Json(d).into_response(),
        Dashboard::Teacher(d) => Json(d).into_response(),
        Dashboard::Student(d) => Json(d).into_response(),
    })
}

/// School-wide attendance report
#[utoipa::path(
    get,
    path = "/api/reports/attendance",
    responses(
        (status = 200, description = "Recent attendance across the school", body = [AttendanceReportRow]),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn attendance_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceReportRow>>, AppError> {
    let rows = DashboardService::attendance_report(state.store.as_ref()).await?;
    Ok(Json(rows))
}

/// School-wide marks report
#[utoipa::path(
    get,
    path = "/api/reports/marks",
    responses(
        (status = 200, description = "Recent marks across the school", body = [MarkReportRow]),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
#[instrument(skip(state))]
pub async fn marks_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<MarkReportRow>>, AppError> {
    let rows = DashboardService::marks_report(state.store.as_ref()).await?;
    Ok(Json(rows))
}
