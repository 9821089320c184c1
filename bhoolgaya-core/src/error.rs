//! Error types for the task engine boundaries.

use thiserror::Error;

/// Errors raised where untyped data enters the engine.
///
/// Classification over already-typed tasks never fails; these only come out of
/// record parsing, filter parsing and settings resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A task record is missing a field or carries a value of the wrong shape.
    #[error("invalid task data{}: field `{field}` {reason}", task_suffix(.id))]
    InvalidTaskData {
        id: Option<String>,
        field: &'static str,
        reason: String,
    },

    #[error("unknown status filter: {0} (expected all, pending or completed)")]
    UnknownStatusFilter(String),

    #[error("unknown quadrant: {0} (expected q1, q2, q3 or q4)")]
    UnknownQuadrant(String),

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid local time: {0}")]
    InvalidLocalTime(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

fn task_suffix(id: &Option<String>) -> String {
    id.as_deref()
        .map(|i| format!(" (task {i})"))
        .unwrap_or_default()
}

impl EngineError {
    pub(crate) fn invalid(id: Option<&str>, field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTaskData {
            id: id.map(str::to_string),
            field,
            reason: reason.into(),
        }
    }
}
