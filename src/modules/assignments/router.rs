use axum::{Router, routing::get};

use super::controller::{assignment_submissions, create_assignment, list_assignments};
use crate::state::AppState;

pub fn init_assignments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assignments).post(create_assignment))
        .route("/{id}/submissions", get(assignment_submissions))
}
