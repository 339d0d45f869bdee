// --- File: crates/groupslot_availability/src/service.rs ---
//! Group availability orchestration.
//!
//! Pulls every member's stored calendar snapshot and time zone through the
//! collaborator traits, pools the busy intervals as if the group shared one
//! calendar, runs the free-slot finder once and narrows the result to the
//! hours every member is awake.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use futures::future::{try_join, try_join_all};
use groupslot_common::services::{CalendarSnapshotStore, GroupDirectory};
use groupslot_common::{not_found, unauthorized, validation_error, GroupslotError};
use groupslot_config::SchedulingConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::interval::{BusyInterval, CandidateSlot, WorkingHours};
use crate::logic::find_available_slots;
use crate::timezone::filter_by_timezone_availability;

/// Zone assumed for members that never chose one.
pub const DEFAULT_MEMBER_TIMEZONE: &str = "UTC";

/// Search parameters shared by every availability request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub working_hours: WorkingHours,
    /// Zone defining calendar days, working hours and all-day events.
    pub zone: Tz,
    pub horizon_days: u32,
    pub default_duration_minutes: i64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours::default(),
            zone: Tz::UTC,
            horizon_days: crate::logic::DEFAULT_HORIZON_DAYS,
            default_duration_minutes: 60,
        }
    }
}

impl SearchSettings {
    pub fn from_config(config: &SchedulingConfig) -> Result<Self, GroupslotError> {
        let working_hours = WorkingHours::new(config.work_start_hour, config.work_end_hour)
            .map_err(|e| GroupslotError::Config(e.to_string()))?;
        let zone = config.reference_timezone.parse::<Tz>().map_err(|_| {
            GroupslotError::Config(format!(
                "unknown reference_timezone `{}`",
                config.reference_timezone
            ))
        })?;
        if config.default_duration_minutes <= 0 {
            return Err(GroupslotError::Config(
                "default_duration_minutes must be positive".to_string(),
            ));
        }
        Ok(Self {
            working_hours,
            zone,
            horizon_days: config.horizon_days,
            default_duration_minutes: config.default_duration_minutes,
        })
    }
}

/// Result of an availability request.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupAvailability {
    pub slots: Vec<CandidateSlot>,
    pub group_name: String,
    pub member_count: usize,
}

pub struct AvailabilityService {
    directory: Arc<dyn GroupDirectory>,
    calendars: Arc<dyn CalendarSnapshotStore>,
    settings: SearchSettings,
}

impl AvailabilityService {
    pub fn new(
        directory: Arc<dyn GroupDirectory>,
        calendars: Arc<dyn CalendarSnapshotStore>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            directory,
            calendars,
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Computes the candidate meeting slots of a group as seen at `now`.
    ///
    /// # Errors
    ///
    /// * `Validation` for a blank `group_id`, a non-positive duration or a
    ///   group without members
    /// * `NotFound` if the group does not exist
    /// * `Unauthorized` if `caller` is not a member
    /// * `Store` if a collaborator read fails
    pub async fn compute_group_availability(
        &self,
        caller: &str,
        group_id: &str,
        duration_minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<GroupAvailability, GroupslotError> {
        if group_id.trim().is_empty() {
            return Err(validation_error("group_id", "must not be empty"));
        }
        let duration = Duration::try_minutes(duration_minutes)
            .filter(|d| *d > Duration::zero())
            .ok_or_else(|| validation_error("duration_minutes", "must be a positive number of minutes"))?;

        let group = self
            .directory
            .get_group(group_id)
            .await?
            .ok_or_else(|| not_found(format!("group {}", group_id)))?;
        if group.members.is_empty() {
            return Err(validation_error("members", "group has no members"));
        }
        if !group.has_member(caller) {
            return Err(unauthorized(format!(
                "{} is not a member of group {}",
                caller, group_id
            )));
        }

        let (busy, zones) = try_join(
            self.pooled_busy_intervals(&group.members),
            self.member_timezones(&group.members),
        )
        .await?;

        let candidates = find_available_slots(
            &busy,
            duration,
            self.settings.working_hours,
            now,
            self.settings.zone,
            self.settings.horizon_days,
        );
        let slots = filter_by_timezone_availability(&candidates, &zones);
        info!(
            group_id,
            members = group.members.len(),
            busy = busy.len(),
            candidates = candidates.len(),
            slots = slots.len(),
            "Computed group availability"
        );

        Ok(GroupAvailability {
            slots,
            group_name: group.name,
            member_count: group.members.len(),
        })
    }

    /// Every member's busy intervals in one pool. Members without a snapshot
    /// contribute nothing; degenerate stored events are skipped.
    async fn pooled_busy_intervals(
        &self,
        members: &[String],
    ) -> Result<Vec<BusyInterval>, GroupslotError> {
        let snapshots = try_join_all(
            members
                .iter()
                .map(|member| self.calendars.get_snapshot(member)),
        )
        .await?;

        let mut pooled = Vec::new();
        for (member, snapshot) in members.iter().zip(snapshots) {
            let Some(snapshot) = snapshot else {
                debug!(member = %member, "No calendar snapshot, treating member as free");
                continue;
            };
            for event in &snapshot.events {
                match BusyInterval::from_event(event, self.settings.zone) {
                    Ok(interval) => pooled.push(interval),
                    Err(err) => warn!(
                        member = %member,
                        event_id = %event.id,
                        "Skipping calendar event: {}",
                        err
                    ),
                }
            }
        }
        Ok(pooled)
    }

    async fn member_timezones(&self, members: &[String]) -> Result<Vec<String>, GroupslotError> {
        let zones = try_join_all(
            members
                .iter()
                .map(|member| self.directory.member_timezone(member)),
        )
        .await?;
        Ok(zones
            .into_iter()
            .map(|zone| zone.unwrap_or_else(|| DEFAULT_MEMBER_TIMEZONE.to_string()))
            .collect())
    }
}
