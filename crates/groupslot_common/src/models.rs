// --- File: crates/groupslot_common/src/models.rs ---
//! Persisted record shapes shared between the store, the availability engine
//! and the notification scanner.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A registered user. The email doubles as the member identifier.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    /// IANA zone id; members without one are treated as UTC.
    pub timezone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

/// A scheduling group and its membership list.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
    pub created_by: String,
    pub invite_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn has_member(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }
}

/// Start or end of a stored calendar event.
///
/// Calendar providers report either an instant or a whole calendar day; the
/// wire form is an RFC 3339 string or a bare `YYYY-MM-DD` date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventTime {
    DateTime(DateTime<FixedOffset>),
    AllDay(NaiveDate),
}

impl TryFrom<String> for EventTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for EventTime {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(EventTime::DateTime(dt));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(EventTime::AllDay)
            .map_err(|_| format!("expected RFC 3339 timestamp or YYYY-MM-DD date, got `{value}`"))
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            EventTime::AllDay(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl StoredEvent {
    pub fn is_shared_with(&self, group_id: &str) -> bool {
        self.shared_with_groups.iter().any(|g| g == group_id)
    }
}

impl From<EventTime> for String {
    fn from(value: EventTime) -> Self {
        value.to_string()
    }
}

/// One event of a member's calendar snapshot.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-05-15T10:00:00Z"))]
    pub start: EventTime,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2025-05-15T11:00:00Z"))]
    pub end: EventTime,
    /// Groups whose shared calendar feed may show this event.
    #[serde(default, alias = "sharedWithGroups")]
    pub shared_with_groups: Vec<String>,
}

/// The last calendar pull stored for a member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarSnapshot {
    pub member_id: String,
    pub events: Vec<StoredEvent>,
    pub last_updated: DateTime<Utc>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Sent,
}

/// A committed meeting together with its reminder lifecycle.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub group_id: String,
    pub group_name: String,
    pub members: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notification_time: DateTime<Utc>,
    pub status: NotificationStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Payload handed to the delivery sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
}
