// --- File: crates/groupslot_availability/src/doc.rs ---
use utoipa::OpenApi;

use crate::groups::{MemberEvents, RegisterUserRequest};
use crate::handlers::{
    AvailabilityRequest, CreateGroupRequest, CreateGroupResponse, DeleteGroupRequest,
    SaveCalendarRequest, SaveCalendarResponse, SuccessResponse, UpdateGroupRequest,
    UpdateGroupResponse,
};
use crate::interval::CandidateSlot;
use crate::service::GroupAvailability;
use groupslot_common::models::{Group, StoredEvent, UserProfile};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::availability_handler,
        crate::handlers::register_user_handler,
        crate::handlers::save_calendar_handler,
        crate::handlers::group_calendar_handler,
        crate::handlers::list_groups_handler,
        crate::handlers::create_group_handler,
        crate::handlers::update_group_handler,
        crate::handlers::delete_group_handler,
    ),
    components(
        schemas(
            AvailabilityRequest,
            GroupAvailability,
            CandidateSlot,
            RegisterUserRequest,
            UserProfile,
            SaveCalendarRequest,
            SaveCalendarResponse,
            StoredEvent,
            MemberEvents,
            Group,
            CreateGroupRequest,
            CreateGroupResponse,
            UpdateGroupRequest,
            UpdateGroupResponse,
            DeleteGroupRequest,
            SuccessResponse,
        )
    ),
    tags(
        (name = "Availability", description = "Group free-time search"),
        (name = "Groups", description = "Users, groups and calendar snapshots")
    )
)]
pub struct AvailabilityApiDoc;
