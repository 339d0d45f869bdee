// --- File: crates/groupslot_notify/src/doc.rs ---
use utoipa::OpenApi;

use crate::handlers::{CreateMeetingRequest, CreateMeetingResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::create_meeting_handler),
    components(schemas(CreateMeetingRequest, CreateMeetingResponse)),
    tags((name = "Meetings", description = "Meeting commitments and reminders"))
)]
pub struct MeetingApiDoc;
