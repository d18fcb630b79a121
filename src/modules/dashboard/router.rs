use axum::{Router, middleware, routing::get};

use super::controller::{attendance_report, dashboard, marks_report};
use crate::middleware::role::require_admin;
use crate::state::AppState;

pub fn init_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

pub fn init_reports_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/attendance", get(attendance_report))
        .route("/marks", get(marks_report))
        .layer(middleware::from_fn_with_state(state, require_admin))
}
