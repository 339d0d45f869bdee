//! Error types for the document store

use groupslot_common::GroupslotError;
use thiserror::Error;

/// Errors that can occur when working with the document store
#[derive(Debug, Error)]
pub enum DbError {
    /// A record with the same id already exists
    #[error("Duplicate {collection} id: {id}")]
    DuplicateId { collection: &'static str, id: String },

    /// A record required by an update does not exist
    #[error("Missing {collection} record: {id}")]
    Missing { collection: &'static str, id: String },
}

impl From<DbError> for GroupslotError {
    fn from(err: DbError) -> Self {
        GroupslotError::Store(err.to_string())
    }
}
