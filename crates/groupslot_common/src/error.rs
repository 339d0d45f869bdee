// --- File: crates/groupslot_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all groupslot errors.
///
/// Feature crates convert their local errors into this enum so that handlers
/// and the scheduler see a single, status-code aware error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupslotError {
    /// A group, meeting or user does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// No caller identity was supplied by the auth boundary
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The caller is known but not allowed to perform the operation
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed input, reported with the offending field
    #[error("Validation error on `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The document store collaborator failed
    #[error("Store error: {0}")]
    Store(String),

    /// The delivery sink failed for one recipient
    #[error("Delivery to {recipient} failed: {message}")]
    Delivery { recipient: String, message: String },

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GroupslotError {
    /// The field a validation error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            GroupslotError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for GroupslotError {
    fn status_code(&self) -> u16 {
        match self {
            GroupslotError::NotFound(_) => 404,
            GroupslotError::Unauthenticated(_) => 401,
            GroupslotError::Unauthorized(_) => 403,
            GroupslotError::Validation { .. } => 400,
            GroupslotError::Store(_) => 500,
            GroupslotError::Delivery { .. } => 502,
            GroupslotError::Config(_) => 500,
            GroupslotError::Internal(_) => 500,
        }
    }
}

impl From<serde_json::Error> for GroupslotError {
    fn from(err: serde_json::Error) -> Self {
        GroupslotError::Internal(err.to_string())
    }
}

// Utility functions for error handling
pub fn not_found<T: fmt::Display>(message: T) -> GroupslotError {
    GroupslotError::NotFound(message.to_string())
}

pub fn unauthorized<T: fmt::Display>(message: T) -> GroupslotError {
    GroupslotError::Unauthorized(message.to_string())
}

pub fn validation_error<T: fmt::Display>(field: &str, message: T) -> GroupslotError {
    GroupslotError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

pub fn store_error<T: fmt::Display>(message: T) -> GroupslotError {
    GroupslotError::Store(message.to_string())
}
