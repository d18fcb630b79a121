use axum::{Router, routing::get};

use super::controller::{list_attendance, mark_attendance};
use crate::state::AppState;

pub fn init_attendance_router() -> Router<AppState> {
    Router::new().route("/", get(list_attendance).post(mark_attendance))
}
