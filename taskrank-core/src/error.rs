//! Engine errors.

use thiserror::Error;

use crate::task::TaskId;

/// A single task failed field-level validation. Recoverable: the task is
/// skipped and its siblings still score.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("importance must be between 1 and 10: {0}")]
    ImportanceOutOfRange(i64),

    #[error("estimated_hours cannot be negative: {0}")]
    NegativeHours(i64),
}

/// The dependency graph is malformed. Fatal for the whole analysis call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Circular dependency detected involving tasks: {0:?}")]
    Cycle(Vec<TaskId>),

    #[error("Task {task_id} ('{title}') has invalid dependencies: {missing:?}")]
    InvalidDependencies {
        task_id: TaskId,
        title: String,
        missing: Vec<TaskId>,
    },
}

/// Construction-time failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown profile: {name}. Choose from [{choices}]")]
    UnknownProfile { name: String, choices: String },
}
