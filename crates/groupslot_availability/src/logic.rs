// --- File: crates/groupslot_availability/src/logic.rs ---
use chrono::{DateTime, Days, Duration, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::interval::{BusyInterval, CandidateSlot, WorkingHours};
use crate::timezone::local_hour;

/// Number of calendar days searched when the caller does not say otherwise.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Sorts intervals by start and coalesces overlapping or touching ones.
pub fn merge_busy_intervals(busy: &[BusyInterval]) -> Vec<BusyInterval> {
    let mut sorted = busy.to_vec();
    sorted.sort_by_key(|interval| interval.start());

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if interval.start() <= last.end() => {
                if interval.end() > last.end() {
                    // Both ends come from valid intervals, so start < end holds.
                    if let Ok(widened) = BusyInterval::new(last.start(), interval.end()) {
                        *last = widened;
                    }
                }
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Calculates the free gaps of every day in the horizon.
///
/// Days run from the local date of `now` in `zone` for `horizon_days` days.
/// Each day is searched between the working hours, with today's window
/// starting no earlier than `now`. Every gap of at least `duration` between
/// busy intervals is reported whole, in chronological order.
///
/// Busy intervals are attached to every day they overlap, so an interval that
/// crosses midnight blocks the start of the following day as well.
pub fn find_available_slots(
    busy_intervals: &[BusyInterval],
    duration: Duration,
    working_hours: WorkingHours,
    now: DateTime<Utc>,
    zone: Tz,
    horizon_days: u32,
) -> Vec<CandidateSlot> {
    let mut available_slots = Vec::new();
    if duration <= Duration::zero() {
        return available_slots;
    }

    let merged_busy = merge_busy_intervals(busy_intervals);
    let today = now.with_timezone(&zone).date_naive();
    debug!(
        "Calculating available slots from {} for {} days, {} busy intervals ({} merged)",
        today,
        horizon_days,
        busy_intervals.len(),
        merged_busy.len()
    );

    for offset in 0..horizon_days {
        let Some(date) = today.checked_add_days(Days::new(offset.into())) else {
            break;
        };
        let (Some(day_open), Some(day_close)) = (
            local_hour(zone, date, working_hours.start_hour()),
            local_hour(zone, date, working_hours.end_hour()),
        ) else {
            continue;
        };

        // Today's window never starts in the past.
        let day_start = day_open.max(now);
        if day_start >= day_close {
            continue;
        }
        collect_day_gaps(
            &merged_busy,
            day_start,
            day_close,
            duration,
            &mut available_slots,
        );
    }
    available_slots
}

fn collect_day_gaps(
    sorted_busy: &[BusyInterval],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    duration: Duration,
    slots: &mut Vec<CandidateSlot>,
) {
    let mut current_time = day_start;
    for busy in sorted_busy
        .iter()
        .filter(|busy| busy.overlaps(day_start, day_end))
    {
        let gap_end = busy.start().min(day_end);
        if gap_end - current_time >= duration {
            slots.push(CandidateSlot::new(current_time, gap_end, duration));
        }
        current_time = current_time.max(busy.end());
    }
    if day_end - current_time >= duration {
        slots.push(CandidateSlot::new(current_time, day_end, duration));
    }
}
