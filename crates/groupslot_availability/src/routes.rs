// --- File: crates/groupslot_availability/src/routes.rs ---

use crate::handlers::{
    availability_handler, create_group_handler, delete_group_handler, group_calendar_handler,
    list_groups_handler, register_user_handler, save_calendar_handler, update_group_handler,
    AvailabilityState,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Creates a router containing the user, calendar, group and availability
/// routes. Paths are relative to the `/api` prefix added by the backend.
pub fn routes(state: Arc<AvailabilityState>) -> Router {
    Router::new()
        .route("/users", post(register_user_handler))
        .route("/calendar", put(save_calendar_handler))
        .route("/calendar/group", get(group_calendar_handler))
        .route("/groups", get(list_groups_handler))
        .route("/groups/create", post(create_group_handler))
        .route("/groups/update", post(update_group_handler))
        .route("/groups/delete", post(delete_group_handler))
        .route("/groups/availability", post(availability_handler))
        .with_state(state)
}
