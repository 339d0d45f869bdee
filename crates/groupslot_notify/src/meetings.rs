// --- File: crates/groupslot_notify/src/meetings.rs ---
//! Committing a group to a meeting slot.

use chrono::{DateTime, Duration, Utc};
use groupslot_common::models::{Notification, NotificationMessage, NotificationStatus};
use groupslot_common::services::{GroupDirectory, NotificationStore};
use groupslot_common::{not_found, unauthorized, validation_error, GroupslotError};
use std::sync::Arc;
use tracing::info;

/// The reminder sent to every member of a due meeting.
pub fn reminder_message(group_name: &str, lead_minutes: i64) -> NotificationMessage {
    NotificationMessage {
        title: "Upcoming Meeting".to_string(),
        body: format!(
            "You have a meeting in {} minutes with your group \"{}\"",
            lead_minutes, group_name
        ),
    }
}

pub struct MeetingService {
    directory: Arc<dyn GroupDirectory>,
    notifications: Arc<dyn NotificationStore>,
    lead: Duration,
}

impl MeetingService {
    pub fn new(
        directory: Arc<dyn GroupDirectory>,
        notifications: Arc<dyn NotificationStore>,
        lead: Duration,
    ) -> Self {
        Self {
            directory,
            notifications,
            lead,
        }
    }

    pub fn lead(&self) -> Duration {
        self.lead
    }

    /// Records a meeting for `group_id` and schedules its reminder.
    ///
    /// The reminder fires `lead` before `start` and goes to every member the
    /// group has at this moment. Returns the new record id.
    ///
    /// # Errors
    ///
    /// * `Validation` if `end <= start` or `group_id` is blank
    /// * `NotFound` if the group does not exist
    /// * `Unauthorized` if `caller` is not a member
    pub async fn create_meeting_notification(
        &self,
        caller: &str,
        group_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<String, GroupslotError> {
        if group_id.trim().is_empty() {
            return Err(validation_error("group_id", "must not be empty"));
        }
        if end <= start {
            return Err(validation_error("end_time", "must be after start_time"));
        }

        let group = self
            .directory
            .get_group(group_id)
            .await?
            .ok_or_else(|| not_found(format!("group {}", group_id)))?;
        if !group.has_member(caller) {
            return Err(unauthorized(format!(
                "{} is not a member of group {}",
                caller, group_id
            )));
        }

        let notification = Notification {
            id: String::new(),
            group_id: group.id,
            group_name: group.name,
            members: group.members,
            start_time: start,
            end_time: end,
            notification_time: start - self.lead,
            status: NotificationStatus::Pending,
            created_by: caller.to_string(),
            created_at: now,
        };
        let notification_time = notification.notification_time;
        let id = self.notifications.insert(notification).await?;
        info!(
            notification_id = %id,
            group_id,
            %notification_time,
            "Scheduled meeting reminder"
        );
        Ok(id)
    }
}
