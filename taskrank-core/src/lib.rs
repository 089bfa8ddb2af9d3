//! taskrank-core: dependency-aware task prioritization.
//!
//! Tasks are checked for dependency cycles and dangling edges, then scored on
//! urgency, importance, effort and dependency pressure under a weighting
//! profile, and returned ranked with an explanation each.

pub mod engine;
pub mod error;
pub mod explain;
pub mod factors;
pub mod graph;
pub mod profile;
pub mod suggest;
pub mod task;
pub mod time;

pub use engine::{AnalysisResult, ScoringEngine, analyze, score_one};
pub use error::{EngineError, GraphError, ScoreError};
pub use graph::{find_cycle, find_invalid_dependencies};
pub use profile::{Profile, Weights};
pub use suggest::{DEFAULT_SUGGESTION_LIMIT, Suggestions, suggest};
pub use task::{ScoreBreakdown, ScoredTask, Task, TaskId, TaskInput, assign_ids};
