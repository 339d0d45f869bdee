// --- File: crates/groupslot_availability/src/interval.rs ---
//! Value types the finder and the filter work on.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use groupslot_common::models::{EventTime, StoredEvent};
use groupslot_common::GroupslotError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::timezone::local_midnight;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("interval end {end} must be after start {start}")]
    Degenerate {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("working hours {start}-{end} must satisfy 0 <= start < end < 24")]
    InvalidWorkingHours { start: u32, end: u32 },
    #[error("no instant corresponds to local midnight of {0}")]
    UnresolvableDate(NaiveDate),
}

impl From<IntervalError> for GroupslotError {
    fn from(err: IntervalError) -> Self {
        let field = match err {
            IntervalError::Degenerate { .. } => "end",
            IntervalError::InvalidWorkingHours { .. } => "working_hours",
            IntervalError::UnresolvableDate(_) => "start",
        };
        GroupslotError::Validation {
            field: field.to_string(),
            message: err.to_string(),
        }
    }
}

/// A period during which some member is unavailable. Always `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusyInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, IntervalError> {
        if end <= start {
            return Err(IntervalError::Degenerate { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Half-open overlap test against `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }

    /// Normalizes a stored calendar event.
    ///
    /// All-day events cover `[date 00:00, end_date 00:00)` in `zone`; an
    /// all-day end on or before the start date is read as inclusive and
    /// extended to the following midnight.
    pub fn from_event(event: &StoredEvent, zone: Tz) -> Result<Self, IntervalError> {
        let start = match event.start {
            EventTime::DateTime(dt) => dt.with_timezone(&Utc),
            EventTime::AllDay(date) => midnight(zone, date)?,
        };
        let end = match (event.start, event.end) {
            (_, EventTime::DateTime(dt)) => dt.with_timezone(&Utc),
            (EventTime::AllDay(start_date), EventTime::AllDay(end_date))
                if end_date <= start_date =>
            {
                midnight(zone, start_date + Duration::days(1))?
            }
            (_, EventTime::AllDay(end_date)) => midnight(zone, end_date)?,
        };
        Self::new(start, end)
    }
}

fn midnight(zone: Tz, date: NaiveDate) -> Result<DateTime<Utc>, IntervalError> {
    local_midnight(zone, date).ok_or(IntervalError::UnresolvableDate(date))
}

/// Daily search window in whole hours of the reference zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    start_hour: u32,
    end_hour: u32,
}

impl WorkingHours {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, IntervalError> {
        if start_hour >= end_hour || end_hour >= 24 {
            return Err(IntervalError::InvalidWorkingHours {
                start: start_hour,
                end: end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

/// A free gap long enough for the requested duration.
///
/// The gap is reported whole: `end - start` may exceed the requested
/// duration. Use [`CandidateSlot::clipped`] or [`CandidateSlot::offers`] for
/// exact-duration meetings.
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-15T09:00:00Z"))]
    pub start: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-15T10:00:00Z"))]
    pub end: DateTime<Utc>,
    /// The minimum duration that qualified this gap.
    #[serde(rename = "duration")]
    #[cfg_attr(feature = "openapi", schema(example = 60))]
    pub duration_minutes: i64,
}

impl CandidateSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, duration_requested: Duration) -> Self {
        Self {
            start,
            end,
            duration_minutes: duration_requested.num_minutes(),
        }
    }

    pub fn duration_requested(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// The first exact-duration meeting that fits in this gap.
    pub fn clipped(&self) -> CandidateSlot {
        CandidateSlot {
            end: self.start + self.duration_requested(),
            ..*self
        }
    }

    /// Exact-duration meetings starting every `step` from the gap start.
    pub fn offers(&self, step: Duration) -> Vec<CandidateSlot> {
        let duration = self.duration_requested();
        if step <= Duration::zero() || duration <= Duration::zero() {
            return Vec::new();
        }
        let mut offers = Vec::new();
        let mut start = self.start;
        while start + duration <= self.end {
            offers.push(CandidateSlot {
                start,
                end: start + duration,
                duration_minutes: self.duration_minutes,
            });
            start += step;
        }
        offers
    }
}
