use axum::{
    Router,
    routing::{post, put},
};

use super::controller::{grade_submission, submit_assignment};
use crate::state::AppState;

pub fn init_submissions_router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_assignment))
        .route("/{id}/grade", put(grade_submission))
}
