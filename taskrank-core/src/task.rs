//! Task model for the prioritization engine.
//!
//! `TaskInput` is what callers hand us (id optional); `Task` always carries a
//! resolved id. Scoring output lives in `ScoredTask`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// Caller-supplied task record. Missing ids are filled by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    pub title: String,
    pub due_date: NaiveDate,
    pub estimated_hours: i64,
    pub importance: i64,
    #[serde(default)]
    pub dependencies: BTreeSet<TaskId>,
}

impl TaskInput {
    /// Resolve into a `Task`, using `position` (0-based) when no id was given.
    pub fn into_task(self, position: usize) -> Task {
        Task {
            id: self.id.unwrap_or(position as TaskId + 1),
            title: self.title,
            due_date: self.due_date,
            estimated_hours: self.estimated_hours,
            importance: self.importance,
            dependencies: self.dependencies,
        }
    }
}

/// Assign 1-based positional ids to every input lacking one.
pub fn assign_ids(inputs: Vec<TaskInput>) -> Vec<Task> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| input.into_task(i))
        .collect()
}

/// Core task type.
///
/// Never mutated by the engine; storage is someone else's problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,

    pub due_date: NaiveDate,

    /// Whole hours, expected >= 0.
    pub estimated_hours: i64,

    /// 1-10, 10 = most critical.
    pub importance: i64,

    /// Ids this task cannot start before.
    #[serde(default)]
    pub dependencies: BTreeSet<TaskId>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            due_date,
            estimated_hours: 1,
            importance: 5,
            dependencies: BTreeSet::new(),
        }
    }

    pub fn with_hours(mut self, hours: i64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = TaskId>) -> Self {
        self.dependencies = deps.into_iter().collect();
        self
    }

    pub fn depends_on(&self, id: TaskId) -> bool {
        self.dependencies.contains(&id)
    }
}

/// Per-factor scores behind a final score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// After overdue amplification, so it may exceed 100.
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

/// A task with its score, breakdown and explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub explanation: String,
    pub is_overdue: bool,
    pub overdue_days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(id: Option<TaskId>, title: &str) -> TaskInput {
        TaskInput {
            id,
            title: title.to_string(),
            due_date: date(2026, 3, 1),
            estimated_hours: 2,
            importance: 5,
            dependencies: BTreeSet::new(),
        }
    }

    #[test]
    fn test_assign_ids_uses_position_when_missing() {
        let tasks = assign_ids(vec![input(None, "a"), input(Some(42), "b"), input(None, "c")]);
        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 42, 3]);
    }

    #[test]
    fn test_duplicate_dependencies_collapse() {
        let t = Task::new(1, "t", date(2026, 3, 1)).with_dependencies([3, 2, 3]);
        assert_eq!(t.dependencies.len(), 2);
        assert!(t.depends_on(2));
        assert!(!t.depends_on(1));
    }

    #[test]
    fn test_task_input_deserializes_without_id_or_deps() {
        let json = r#"{"title":"Write report","due_date":"2026-03-01",
            "estimated_hours":3,"importance":7}"#;
        let parsed: TaskInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, None);
        assert!(parsed.dependencies.is_empty());
        assert_eq!(parsed.into_task(4).id, 5);
    }

    #[test]
    fn test_scored_task_flattens_task_fields() {
        let scored = ScoredTask {
            task: Task::new(7, "flat", date(2026, 3, 1)),
            score: 12.5,
            breakdown: ScoreBreakdown::default(),
            explanation: "x.".to_string(),
            is_overdue: false,
            overdue_days: 0,
        };
        let v = serde_json::to_value(&scored).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["title"], "flat");
        assert_eq!(v["due_date"], "2026-03-01");
        assert_eq!(v["breakdown"]["urgency"], 0.0);
    }
}
