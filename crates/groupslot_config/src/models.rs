// --- File: crates/groupslot_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Availability search ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Used when an availability request does not name a duration.
    pub default_duration_minutes: i64,
    /// Daily search window, in hours of the reference zone.
    pub work_start_hour: u32,
    pub work_end_hour: u32,
    /// Number of calendar days searched, today included.
    pub horizon_days: u32,
    /// Zone that defines calendar days, working hours and all-day events.
    pub reference_timezone: String,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: 60,
            work_start_hour: 9,
            work_end_hour: 17,
            horizon_days: 7,
            reference_timezone: "UTC".to_string(),
        }
    }
}

// --- Reminders ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Period of the due-scanner; also its look-ahead window.
    pub scan_interval_seconds: u64,
    /// How long before a meeting its reminder fires.
    pub reminder_lead_minutes: i64,
    /// When set, reminders are POSTed here; otherwise they are only logged.
    pub webhook_url: Option<String>,
    /// Upper bound on a single webhook request, in seconds.
    pub webhook_timeout_seconds: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            scan_interval_seconds: 300,
            reminder_lead_minutes: 30,
            webhook_url: None,
            webhook_timeout_seconds: 10,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}
