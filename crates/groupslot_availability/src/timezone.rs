// --- File: crates/groupslot_availability/src/timezone.rs ---
//! Per-member "awake window" filtering.
//!
//! Each member is schedulable from 08:00 local time until 02:00 local time the
//! following day. Local time is resolved through the IANA rules shipped with
//! `chrono-tz`, so daylight-saving transitions are honoured.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::interval::CandidateSlot;

/// Local hour at which a member's awake window opens.
pub const AWAKE_OPENS_HOUR: u32 = 8;
/// Local hour on the following day at which the window closes.
pub const AWAKE_CLOSES_HOUR_NEXT_DAY: u32 = 2;

/// Maps a local wall-clock time to an instant.
///
/// Ambiguous times (clock set back) resolve to the earlier instant; times that
/// do not exist (clock set forward) resolve to one hour later.
pub(crate) fn resolve_local(zone: Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    let resolved = match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => zone
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    };
    resolved.map(|dt| dt.with_timezone(&Utc))
}

/// The instant at which `date` reaches `hour`:00 local time in `zone`.
pub(crate) fn local_hour(zone: Tz, date: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
    resolve_local(zone, date.and_hms_opt(hour, 0, 0)?)
}

pub(crate) fn local_midnight(zone: Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    local_hour(zone, date, 0)
}

/// `[D 08:00, D+1 02:00)` for an anchor date `D`, as instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwakeWindow {
    pub opens: DateTime<Utc>,
    pub closes: DateTime<Utc>,
}

impl AwakeWindow {
    pub fn anchored(zone: Tz, date: NaiveDate) -> Option<Self> {
        Some(Self {
            opens: local_hour(zone, date, AWAKE_OPENS_HOUR)?,
            closes: local_hour(zone, date.succ_opt()?, AWAKE_CLOSES_HOUR_NEXT_DAY)?,
        })
    }

    /// Left-closed, right-open membership.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.opens <= instant && instant < self.closes
    }
}

/// Whether both ends of `slot` fall inside one awake window of `zone`.
///
/// The window is anchored on the local date of the slot start, or on the
/// previous date when the start lies in the 00:00-02:00 tail of yesterday's
/// window.
pub fn is_within_awake_window(slot: &CandidateSlot, zone: Tz) -> bool {
    let local_date = slot.start.with_timezone(&zone).date_naive();
    [Some(local_date), local_date.pred_opt()]
        .into_iter()
        .flatten()
        .filter_map(|anchor| AwakeWindow::anchored(zone, anchor))
        .any(|window| window.contains(slot.start) && window.contains(slot.end))
}

/// Keeps the slots that every member can attend, preserving order.
///
/// An unknown zone id fails closed: no slot is returned.
pub fn filter_by_timezone_availability(
    slots: &[CandidateSlot],
    member_timezones: &[String],
) -> Vec<CandidateSlot> {
    let mut zones = Vec::with_capacity(member_timezones.len());
    for zone_id in member_timezones {
        match zone_id.parse::<Tz>() {
            Ok(zone) => zones.push(zone),
            Err(err) => {
                warn!(zone = %zone_id, "Unknown time zone, rejecting all slots: {}", err);
                return Vec::new();
            }
        }
    }

    let kept: Vec<CandidateSlot> = slots
        .iter()
        .filter(|slot| zones.iter().all(|zone| is_within_awake_window(slot, *zone)))
        .copied()
        .collect();
    debug!(
        "Time zone filter kept {} of {} slots for {} zones",
        kept.len(),
        slots.len(),
        zones.len()
    );
    kept
}
