// --- File: crates/groupslot_notify/src/routes.rs ---
use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handlers::{create_meeting_handler, MeetingState};

/// Meeting routes, relative to the `/api` prefix.
pub fn routes(state: Arc<MeetingState>) -> Router {
    Router::new()
        .route("/meetings/create", post(create_meeting_handler))
        .with_state(state)
}
