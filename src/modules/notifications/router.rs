use axum::{Router, routing::get};

use super::controller::{create_notification, list_notifications};
use crate::state::AppState;

pub fn init_notifications_router() -> Router<AppState> {
    Router::new().route("/", get(list_notifications).post(create_notification))
}
