use axum::{Router, middleware, routing::get};

use super::controller::{create_student, list_students, my_profile, update_my_contact};
use crate::middleware::role::require_admin;
use crate::state::AppState;

/// `/me` is reachable by students themselves; the collection routes are
/// admin-only.
pub fn init_students_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", get(list_students).post(create_student))
        .layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/me", get(my_profile).put(update_my_contact))
        .merge(admin_routes)
}
