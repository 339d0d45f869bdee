// --- File: crates/groupslot_notify/src/lib.rs ---
//! Meeting reminders for groupslot.
//!
//! Committing a group to a slot stores a pending reminder
//! ([`meetings::MeetingService`]). The [`scanner::NotificationScanner`] runs on
//! a fixed cadence, delivers due reminders through a
//! [`DeliverySink`](groupslot_common::services::DeliverySink) and marks them
//! sent.
//!
//! # Example
//!
//! ```rust,no_run
//! use groupslot_db::MemoryStore;
//! use groupslot_notify::{spawn_periodic, LoggingDeliverySink, NotificationScanner};
//! use std::sync::Arc;
//!
//! async fn start() {
//!     let store = Arc::new(MemoryStore::new());
//!     let scanner = NotificationScanner::new(
//!         store,
//!         Arc::new(LoggingDeliverySink),
//!         chrono::Duration::minutes(5),
//!     );
//!     let handle = spawn_periodic(Arc::new(scanner), std::time::Duration::from_secs(300));
//!     handle.shutdown().await;
//! }
//! ```

#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod meetings;
pub mod routes;
pub mod scanner;
#[cfg(test)]
mod scanner_test;
pub mod sink;

pub use meetings::{reminder_message, MeetingService};
pub use routes::routes;
pub use scanner::{spawn_periodic, NotificationScanner, ScannerHandle};
pub use sink::{LoggingDeliverySink, WebhookDeliverySink};
