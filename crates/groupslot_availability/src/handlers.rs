// File: crates/groupslot_availability/src/handlers.rs
use axum::{extract::State, http::HeaderMap, response::Json};
use chrono::Utc;
use groupslot_common::models::{Group, StoredEvent, UserProfile};
use groupslot_common::services::{CalendarSnapshotStore, GroupDirectory};
use groupslot_common::{caller_from_headers, GroupslotError};
use groupslot_config::AppConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::groups::{GroupService, MemberEvents, RegisterUserRequest};
use crate::service::{AvailabilityService, GroupAvailability, SearchSettings};

// Shared state needed by the availability and group handlers
pub struct AvailabilityState {
    pub availability: AvailabilityService,
    pub groups: GroupService,
}

impl AvailabilityState {
    pub fn new<S>(config: &AppConfig, store: Arc<S>) -> Result<Self, GroupslotError>
    where
        S: GroupDirectory + CalendarSnapshotStore + 'static,
    {
        let settings = SearchSettings::from_config(&config.scheduling)?;
        Ok(Self {
            availability: AvailabilityService::new(store.clone(), store.clone(), settings),
            groups: GroupService::new(store.clone(), store, settings.zone),
        })
    }
}

// --- Request / response bodies ---

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct AvailabilityRequest {
    #[serde(alias = "groupId")]
    pub group_id: String,
    /// Meeting length in minutes; the configured default when absent.
    pub duration: Option<i64>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct SaveCalendarRequest {
    pub events: Vec<StoredEvent>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct SaveCalendarResponse {
    pub saved: usize,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateGroupRequest {
    #[serde(alias = "groupName")]
    pub group_name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateGroupResponse {
    pub group_id: String,
    pub invite_token: String,
    pub members: Vec<String>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateGroupRequest {
    #[serde(alias = "groupId")]
    pub group_id: String,
    #[serde(alias = "newMembers")]
    pub new_members: Vec<String>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateGroupResponse {
    pub success: bool,
    pub members: Vec<String>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteGroupRequest {
    #[serde(alias = "groupId")]
    pub group_id: String,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Deserialize, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// --- Handlers ---

/// Handler computing a group's candidate meeting slots.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/groups/availability",
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Candidate slots in chronological order", body = GroupAvailability),
        (status = 400, description = "Invalid duration or group id"),
        (status = 403, description = "Caller is not a member"),
        (status = 404, description = "Group not found")
    ),
    tag = "Availability"
))]
pub async fn availability_handler(
    State(state): State<Arc<AvailabilityState>>,
    headers: HeaderMap,
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<GroupAvailability>, GroupslotError> {
    let caller = caller_from_headers(&headers)?;
    let duration = request
        .duration
        .unwrap_or(state.availability.settings().default_duration_minutes);
    let availability = state
        .availability
        .compute_group_availability(&caller, &request.group_id, duration, Utc::now())
        .await?;
    Ok(Json(availability))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "Stored user", body = UserProfile),
        (status = 400, description = "Invalid email or time zone")
    ),
    tag = "Groups"
))]
pub async fn register_user_handler(
    State(state): State<Arc<AvailabilityState>>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<UserProfile>, GroupslotError> {
    let user = state.groups.register_user(request, Utc::now()).await?;
    Ok(Json(user))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/calendar",
    request_body = SaveCalendarRequest,
    responses(
        (status = 200, description = "Snapshot replaced", body = SaveCalendarResponse),
        (status = 400, description = "An event is empty or backwards")
    ),
    tag = "Groups"
))]
pub async fn save_calendar_handler(
    State(state): State<Arc<AvailabilityState>>,
    headers: HeaderMap,
    Json(request): Json<SaveCalendarRequest>,
) -> Result<Json<SaveCalendarResponse>, GroupslotError> {
    let caller = caller_from_headers(&headers)?;
    let saved = state
        .groups
        .save_calendar_snapshot(&caller, request.events, Utc::now())
        .await?;
    info!(member = %caller, saved, "Saved calendar snapshot");
    Ok(Json(SaveCalendarResponse { saved }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/calendar/group",
    responses((status = 200, description = "Events of everyone sharing a group with the caller", body = [MemberEvents])),
    tag = "Groups"
))]
pub async fn group_calendar_handler(
    State(state): State<Arc<AvailabilityState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<MemberEvents>>, GroupslotError> {
    let caller = caller_from_headers(&headers)?;
    Ok(Json(state.groups.group_calendar_events(&caller).await?))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/groups",
    responses((status = 200, description = "Groups the caller belongs to", body = [Group])),
    tag = "Groups"
))]
pub async fn list_groups_handler(
    State(state): State<Arc<AvailabilityState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Group>>, GroupslotError> {
    let caller = caller_from_headers(&headers)?;
    Ok(Json(state.groups.groups_for_member(&caller).await?))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/groups/create",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = CreateGroupResponse),
        (status = 400, description = "Unregistered members or empty name")
    ),
    tag = "Groups"
))]
pub async fn create_group_handler(
    State(state): State<Arc<AvailabilityState>>,
    headers: HeaderMap,
    Json(request): Json<CreateGroupRequest>,
) -> Result<Json<CreateGroupResponse>, GroupslotError> {
    let caller = caller_from_headers(&headers)?;
    let group = state
        .groups
        .create_group(&caller, &request.group_name, &request.members, Utc::now())
        .await?;
    Ok(Json(CreateGroupResponse {
        group_id: group.id,
        invite_token: group.invite_token,
        members: group.members,
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/groups/update",
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "Members added", body = UpdateGroupResponse),
        (status = 403, description = "Caller is not a member"),
        (status = 404, description = "Group not found")
    ),
    tag = "Groups"
))]
pub async fn update_group_handler(
    State(state): State<Arc<AvailabilityState>>,
    headers: HeaderMap,
    Json(request): Json<UpdateGroupRequest>,
) -> Result<Json<UpdateGroupResponse>, GroupslotError> {
    let caller = caller_from_headers(&headers)?;
    let group = state
        .groups
        .add_members(&caller, &request.group_id, &request.new_members, Utc::now())
        .await?;
    Ok(Json(UpdateGroupResponse {
        success: true,
        members: group.members,
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/groups/delete",
    request_body = DeleteGroupRequest,
    responses(
        (status = 200, description = "Group deleted", body = SuccessResponse),
        (status = 403, description = "Caller is not the creator"),
        (status = 404, description = "Group not found")
    ),
    tag = "Groups"
))]
pub async fn delete_group_handler(
    State(state): State<Arc<AvailabilityState>>,
    headers: HeaderMap,
    Json(request): Json<DeleteGroupRequest>,
) -> Result<Json<SuccessResponse>, GroupslotError> {
    let caller = caller_from_headers(&headers)?;
    state.groups.delete_group(&caller, &request.group_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}
