use axum::{Router, routing::get};

use super::controller::{course_students, create_course, list_courses};
use crate::state::AppState;

/// Creation is admin-only (checked in the handler); listing is open to
/// every authenticated role and scoped inside the service.
pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/{id}/students", get(course_students))
}
