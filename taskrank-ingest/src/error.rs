//! Payload rejection reasons. Any of these rejects the whole request.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Task at index {index} is missing required fields: {fields:?}")]
    MissingFields { index: usize, fields: Vec<&'static str> },

    #[error("Task at index {index} has invalid {field}.")]
    InvalidField {
        index: usize,
        field: &'static str,
        received: Value,
    },

    #[error("Task \"{task}\" has invalid due_date format. Use YYYY-MM-DD.")]
    InvalidDueDate { task: String, received: Value },

    #[error("Task \"{task}\" has invalid estimated_hours. Must be non-negative integer.")]
    InvalidHours { task: String, received: Value },

    #[error("Task \"{task}\" has invalid importance. Must be integer between 1 and 10.")]
    InvalidImportance { task: String, received: Value },

    #[error("Task \"{task}\" has invalid dependencies. Must be a list.")]
    InvalidDependencies { task: String, received: Value },

    #[error("Task \"{task}\" has invalid dependency. All dependencies must be integers.")]
    InvalidDependency { task: String, received: Value },
}

impl PayloadError {
    /// The offending value, when there is one.
    pub fn received(&self) -> Option<&Value> {
        match self {
            PayloadError::InvalidInput(_) | PayloadError::MissingFields { .. } => None,
            PayloadError::InvalidField { received, .. }
            | PayloadError::InvalidDueDate { received, .. }
            | PayloadError::InvalidHours { received, .. }
            | PayloadError::InvalidImportance { received, .. }
            | PayloadError::InvalidDependencies { received, .. }
            | PayloadError::InvalidDependency { received, .. } => Some(received),
        }
    }
}
