// --- File: crates/groupslot_availability/src/lib.rs ---
//! Multi-calendar availability engine.
//!
//! - [`interval`]: busy intervals, working hours, candidate slots
//! - [`logic`]: the free-slot finder
//! - [`timezone`]: the per-member awake-window filter
//! - [`service`]: group availability orchestration over the store collaborators
//! - [`groups`]: users, groups and calendar snapshot intake
//! - [`handlers`] / [`routes`]: the HTTP surface

#[cfg(feature = "openapi")]
pub mod doc;
pub mod groups;
pub mod handlers;
pub mod interval;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;
pub mod service;
pub mod timezone;

pub use interval::{BusyInterval, CandidateSlot, IntervalError, WorkingHours};
pub use logic::{find_available_slots, merge_busy_intervals};
pub use routes::routes;
pub use service::{AvailabilityService, GroupAvailability, SearchSettings};
pub use timezone::{filter_by_timezone_availability, is_within_awake_window};
