use axum::{Router, routing::get};

use super::controller::{list_feedback, submit_feedback};
use crate::state::AppState;

pub fn init_feedback_router() -> Router<AppState> {
    Router::new().route("/", get(list_feedback).post(submit_feedback))
}
