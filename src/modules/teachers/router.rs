use axum::{Router, routing::get};

use super::controller::{create_teacher, list_teachers};
use crate::state::AppState;

pub fn init_teachers_router() -> Router<AppState> {
    Router::new().route("/", get(list_teachers).post(create_teacher))
}
