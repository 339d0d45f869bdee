// --- File: crates/groupslot_availability/src/groups.rs ---
//! Users, group membership and calendar snapshot intake.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::future::try_join_all;
use groupslot_common::models::{CalendarSnapshot, Group, StoredEvent, UserProfile};
use groupslot_common::services::{CalendarSnapshotStore, GroupDirectory};
use groupslot_common::{not_found, unauthorized, validation_error, GroupslotError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::interval::BusyInterval;

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
    /// IANA zone id, e.g. `Europe/Zurich`.
    pub timezone: Option<String>,
}

/// The events one member shares with one group, as returned by
/// [`GroupService::group_calendar_events`].
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberEvents {
    pub group_id: String,
    pub member: String,
    pub events: Vec<StoredEvent>,
}

pub struct GroupService {
    directory: Arc<dyn GroupDirectory>,
    calendars: Arc<dyn CalendarSnapshotStore>,
    /// Zone used to check all-day events on intake.
    zone: Tz,
}

impl GroupService {
    pub fn new(
        directory: Arc<dyn GroupDirectory>,
        calendars: Arc<dyn CalendarSnapshotStore>,
        zone: Tz,
    ) -> Self {
        Self {
            directory,
            calendars,
            zone,
        }
    }

    /// Creates or refreshes a user record. The creation time survives updates.
    pub async fn register_user(
        &self,
        request: RegisterUserRequest,
        now: DateTime<Utc>,
    ) -> Result<UserProfile, GroupslotError> {
        let email = request.email.trim().to_string();
        if email.is_empty() {
            return Err(validation_error("email", "must not be empty"));
        }
        if let Some(zone) = &request.timezone {
            zone.parse::<Tz>()
                .map_err(|_| validation_error("timezone", format!("unknown time zone `{}`", zone)))?;
        }

        let existing = self.directory.get_user(&email).await?;
        let user = match existing {
            Some(previous) => UserProfile {
                name: request.name,
                image: request.image,
                timezone: request.timezone.or(previous.timezone),
                last_login: now,
                ..previous
            },
            None => UserProfile {
                email,
                name: request.name,
                image: request.image,
                timezone: request.timezone,
                created_at: now,
                last_login: now,
            },
        };
        self.directory.put_user(user).await
    }

    /// Creates a group owned by `caller`, who is always a member.
    pub async fn create_group(
        &self,
        caller: &str,
        group_name: &str,
        members: &[String],
        now: DateTime<Utc>,
    ) -> Result<Group, GroupslotError> {
        let name = group_name.trim();
        if name.is_empty() {
            return Err(validation_error("group_name", "must not be empty"));
        }
        let mut candidates = members.to_vec();
        candidates.push(caller.to_string());
        let members = normalize_members(&candidates);
        self.ensure_registered(&members).await?;

        let group = Group {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            members,
            created_by: caller.to_string(),
            invite_token: Uuid::new_v4().simple().to_string(),
            created_at: now,
            updated_at: now,
        };
        let group = self.directory.put_group(group).await?;
        info!(group_id = %group.id, members = group.members.len(), "Created group");
        Ok(group)
    }

    /// Adds registered users to a group the caller belongs to.
    pub async fn add_members(
        &self,
        caller: &str,
        group_id: &str,
        new_members: &[String],
        now: DateTime<Utc>,
    ) -> Result<Group, GroupslotError> {
        let mut group = self.existing_group(group_id).await?;
        if !group.has_member(caller) {
            return Err(unauthorized(format!(
                "{} is not a member of group {}",
                caller, group_id
            )));
        }
        let additions = normalize_members(new_members);
        if additions.is_empty() {
            return Err(validation_error("new_members", "no members given"));
        }
        self.ensure_registered(&additions).await?;

        let mut added = 0;
        for member in additions {
            if !group.has_member(&member) {
                group.members.push(member);
                added += 1;
            }
        }
        group.updated_at = now;
        let group = self.directory.put_group(group).await?;
        info!(group_id = %group.id, added, "Added group members");
        Ok(group)
    }

    /// Deletes a group. Only its creator may do so.
    pub async fn delete_group(&self, caller: &str, group_id: &str) -> Result<(), GroupslotError> {
        let group = self.existing_group(group_id).await?;
        if group.created_by != caller {
            return Err(unauthorized("only the group creator can delete the group"));
        }
        self.directory.delete_group(group_id).await?;
        info!(group_id, "Deleted group");
        Ok(())
    }

    pub async fn groups_for_member(&self, member: &str) -> Result<Vec<Group>, GroupslotError> {
        self.directory.groups_for_member(member).await
    }

    /// Replaces a member's calendar snapshot. Every event must normalize to a
    /// non-empty interval.
    pub async fn save_calendar_snapshot(
        &self,
        member: &str,
        events: Vec<StoredEvent>,
        now: DateTime<Utc>,
    ) -> Result<usize, GroupslotError> {
        for (index, event) in events.iter().enumerate() {
            BusyInterval::from_event(event, self.zone).map_err(|err| {
                validation_error(&format!("events[{}].end", index), err)
            })?;
        }
        let count = events.len();
        self.calendars
            .put_snapshot(CalendarSnapshot {
                member_id: member.to_string(),
                events,
                last_updated: now,
            })
            .await?;
        Ok(count)
    }

    /// Events shared with each of `member`'s groups, one entry per group and
    /// group member. Events not shared with a group are left out of its entries.
    pub async fn group_calendar_events(
        &self,
        member: &str,
    ) -> Result<Vec<MemberEvents>, GroupslotError> {
        let groups = self.directory.groups_for_member(member).await?;
        let all_members: Vec<String> = groups.iter().flat_map(|g| g.members.clone()).collect();
        let members = normalize_members(&all_members);

        let snapshots = try_join_all(members.iter().map(|m| self.calendars.get_snapshot(m))).await?;
        let events: HashMap<String, Vec<StoredEvent>> = members
            .into_iter()
            .zip(snapshots)
            .map(|(member, snapshot)| (member, snapshot.map(|s| s.events).unwrap_or_default()))
            .collect();
        let events = &events;

        Ok(groups
            .iter()
            .flat_map(|group| {
                normalize_members(&group.members)
                    .into_iter()
                    .map(move |member| MemberEvents {
                        group_id: group.id.clone(),
                        events: events
                            .get(&member)
                            .map(|all| {
                                all.iter()
                                    .filter(|e| e.is_shared_with(&group.id))
                                    .cloned()
                                    .collect()
                            })
                            .unwrap_or_default(),
                        member,
                    })
            })
            .collect())
    }

    async fn existing_group(&self, group_id: &str) -> Result<Group, GroupslotError> {
        if group_id.trim().is_empty() {
            return Err(validation_error("group_id", "must not be empty"));
        }
        self.directory
            .get_group(group_id)
            .await?
            .ok_or_else(|| not_found(format!("group {}", group_id)))
    }

    async fn ensure_registered(&self, members: &[String]) -> Result<(), GroupslotError> {
        let users = try_join_all(members.iter().map(|m| self.directory.get_user(m))).await?;
        let unknown: Vec<&str> = members
            .iter()
            .zip(users)
            .filter(|(_, user)| user.is_none())
            .map(|(member, _)| member.as_str())
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(validation_error(
                "members",
                format!("not registered: {}", unknown.join(", ")),
            ))
        }
    }
}

/// Trims, drops blanks and removes duplicates, keeping first occurrences.
pub fn normalize_members(members: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(members.len());
    for member in members {
        let member = member.trim();
        if !member.is_empty() && !normalized.iter().any(|m| m == member) {
            normalized.push(member.to_string());
        }
    }
    normalized
}
