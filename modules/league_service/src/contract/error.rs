//! Contract error types for the league service
//!
//! Transport-agnostic error taxonomy; the storage layer classifies raw store
//! failures into these kinds and never surfaces driver error codes.

use thiserror::Error;

/// League service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeagueError {
    /// Lookup by id or predicate yielded nothing
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource kind (league, team, coach, match)
        resource: &'static str,
        /// Resource identifier
        id: String,
    },

    /// Missing required field, overlong field, or malformed input
    #[error("validation error: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },

    /// Optimistic-concurrency version mismatch on update
    #[error("conflict: {reason}")]
    Conflict {
        /// Conflict reason
        reason: String,
    },

    /// Store rejected the write: unique-index collision or referential
    /// integrity restriction
    #[error("constraint violation: {reason}")]
    Constraint {
        /// Constraint reason
        reason: String,
    },

    /// Declared but unimplemented store function
    #[error("not implemented: {feature}")]
    NotImplemented {
        /// Feature name
        feature: &'static str,
    },

    /// Unexpected store failure; details live in the logs only
    #[error("internal error")]
    Internal,
}

impl LeagueError {
    /// Not-found error for an integer id lookup.
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Version-token mismatch on a conditional update.
    pub fn version_conflict(resource: &'static str, id: i32) -> Self {
        Self::Conflict {
            reason: format!("{resource} {id} was modified concurrently; re-read and retry"),
        }
    }
}
