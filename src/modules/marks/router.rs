use axum::{Router, routing::get};

use super::controller::{enter_mark, list_marks};
use crate::state::AppState;

pub fn init_marks_router() -> Router<AppState> {
    Router::new().route("/", get(list_marks).post(enter_mark))
}
