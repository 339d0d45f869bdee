//! In-memory document store for groupslot.
//!
//! The scheduling core treats persistence as an external collaborator with
//! get/put/query-by-field operations. [`MemoryStore`] implements every
//! collaborator trait from `groupslot_common::services` on top of
//! `tokio::sync::RwLock`-guarded maps, which is what the backend runs with and
//! what the other crates test against.
//!
//! # Example
//!
//! ```rust,no_run
//! use groupslot_db::MemoryStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! // hand `store.clone()` to every service that needs a collaborator
//! ```

pub mod error;
pub mod store;
#[cfg(test)]
mod store_test;

pub use error::DbError;
pub use store::MemoryStore;
