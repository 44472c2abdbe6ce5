//! Error types for schedule-conflict operations.
//!
//! A detected conflict is never an error. These types cover the storage
//! collaborator failing, configuration problems, and malformed date input.

use thiserror::Error;

/// Errors raised by a [`ScheduleStore`](crate::store::ScheduleStore) implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A query was issued but failed.
    #[error("Store query '{operation}' failed: {message}")]
    Query { operation: String, message: String },
}

#[derive(Error, Debug)]
pub enum ConflictError {
    /// Storage read failures pass through untouched.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Only raised under [`TimezonePolicy::Strict`](crate::config::TimezonePolicy::Strict).
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConflictError>;

/// Result alias for store implementations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
