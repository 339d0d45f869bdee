// --- File: crates/groupslot_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Persisted record shapes
pub mod services; // Collaborator abstractions
#[cfg(test)]
mod models_test;

// Re-export error types and utilities for easier access
pub use error::{
    not_found, store_error, unauthorized, validation_error, GroupslotError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{caller_from_headers, IntoHttpResponse, CALLER_HEADER};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_result};

pub use services::{
    BoxFuture, CalendarSnapshotStore, DeliverySink, GroupDirectory, NotificationStore,
};
