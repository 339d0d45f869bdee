// File: crates/groupslot_notify/src/handlers.rs
use axum::{extract::State, http::HeaderMap, response::Json};
use chrono::{DateTime, Duration, Utc};
use groupslot_common::services::{GroupDirectory, NotificationStore};
use groupslot_common::{caller_from_headers, GroupslotError};
use groupslot_config::NotificationConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::meetings::MeetingService;

// Shared state needed by the meeting handlers
pub struct MeetingState {
    pub meetings: MeetingService,
}

impl MeetingState {
    pub fn new<S>(config: &NotificationConfig, store: Arc<S>) -> Result<Self, GroupslotError>
    where
        S: GroupDirectory + NotificationStore + 'static,
    {
        let lead = Duration::try_minutes(config.reminder_lead_minutes)
            .filter(|lead| *lead >= Duration::zero())
            .ok_or_else(|| {
                GroupslotError::Config("reminder_lead_minutes must not be negative".to_string())
            })?;
        Ok(Self {
            meetings: MeetingService::new(store.clone(), store, lead),
        })
    }
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateMeetingRequest {
    #[serde(alias = "groupId")]
    pub group_id: String,
    #[serde(alias = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(alias = "endTime")]
    pub end_time: DateTime<Utc>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateMeetingResponse {
    pub success: bool,
    pub notification_id: String,
    pub notification_time: DateTime<Utc>,
}

/// Handler committing a group to a meeting slot.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/meetings/create",
    request_body = CreateMeetingRequest,
    responses(
        (status = 200, description = "Meeting recorded and reminder scheduled", body = CreateMeetingResponse),
        (status = 400, description = "End is not after start"),
        (status = 403, description = "Caller is not a member"),
        (status = 404, description = "Group not found")
    ),
    tag = "Meetings"
))]
pub async fn create_meeting_handler(
    State(state): State<Arc<MeetingState>>,
    headers: HeaderMap,
    Json(request): Json<CreateMeetingRequest>,
) -> Result<Json<CreateMeetingResponse>, GroupslotError> {
    let caller = caller_from_headers(&headers)?;
    let notification_id = state
        .meetings
        .create_meeting_notification(
            &caller,
            &request.group_id,
            request.start_time,
            request.end_time,
            Utc::now(),
        )
        .await?;
    Ok(Json(CreateMeetingResponse {
        success: true,
        notification_id,
        notification_time: request.start_time - state.meetings.lead(),
    }))
}
