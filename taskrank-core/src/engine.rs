//! Scoring engine: validates the dependency graph, scores every task under a
//! profile, and ranks the results.
//!
//! Stateless. Two calls with the same inputs and reference date return
//! identical results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, ScoreError};
use crate::explain::{ExplainContext, explain};
use crate::factors::{
    blocking_count, dependency_score, effort_score, importance_score, urgency_score,
};
use crate::graph;
use crate::profile::{Profile, Weights};
use crate::task::{ScoreBreakdown, ScoredTask, Task, TaskInput, assign_ids};

/// Ranked output of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Descending by score; ties keep input order.
    pub tasks: Vec<ScoredTask>,
    pub profile: Profile,
    /// Fatal structural errors (with an empty `tasks`) or per-task failures.
    pub errors: Vec<String>,
}

impl AnalysisResult {
    fn empty(profile: Profile) -> Self {
        Self {
            tasks: Vec::new(),
            profile,
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoringEngine {
    profile: Profile,
}

impl ScoringEngine {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    /// Build from a catalog name; unknown names are rejected here, before any task is seen.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn weights(&self) -> Weights {
        self.profile.weights()
    }

    /// Score a single task against `tasks` as dependency context.
    ///
    /// Does not validate the graph; callers that need that use `analyze`.
    pub fn score_one(
        &self,
        task: &Task,
        tasks: &[Task],
        today: NaiveDate,
    ) -> Result<ScoredTask, ScoreError> {
        let effort = effort_score(task.estimated_hours)?;
        let importance = importance_score(task.importance)?;
        let raw_urgency = urgency_score(task.due_date, today);
        let dependency = dependency_score(task, tasks);

        let w = self.weights();
        let days_until = (task.due_date - today).num_days();
        let is_overdue = days_until < 0;
        let overdue_days = if is_overdue { -days_until } else { 0 };

        let urgency = if is_overdue {
            raw_urgency.abs() * w.overdue_multiplier
        } else {
            raw_urgency
        };

        let score = (urgency * w.urgency
            + importance * w.importance
            + effort * w.effort
            + dependency * w.dependency)
            .max(0.0);

        let breakdown = ScoreBreakdown {
            urgency,
            importance,
            effort,
            dependency,
        };

        let explanation = explain(
            &breakdown,
            ExplainContext {
                overdue_days,
                blocking: blocking_count(task, tasks),
                dependencies: task.dependencies.len(),
            },
        );

        Ok(ScoredTask {
            task: task.clone(),
            score: round2(score),
            breakdown: ScoreBreakdown {
                urgency: round2(urgency),
                importance: round2(importance),
                effort: round2(effort),
                dependency: round2(dependency),
            },
            explanation,
            is_overdue,
            overdue_days,
        })
    }

    /// Assign missing ids by position, then analyze.
    pub fn analyze(&self, inputs: Vec<TaskInput>, today: NaiveDate) -> AnalysisResult {
        let tasks = assign_ids(inputs);
        self.analyze_tasks(&tasks, today)
    }

    /// Validate, score and rank tasks whose ids are already resolved.
    pub fn analyze_tasks(&self, tasks: &[Task], today: NaiveDate) -> AnalysisResult {
        let mut result = AnalysisResult::empty(self.profile);
        if tasks.is_empty() {
            return result;
        }

        if let Err(errors) = graph::validate(tasks) {
            debug!(profile = %self.profile, errors = errors.len(), "dependency graph rejected");
            result.errors = errors.iter().map(ToString::to_string).collect();
            return result;
        }

        for task in tasks {
            match self.score_one(task, tasks, today) {
                Ok(scored) => result.tasks.push(scored),
                Err(e) => result
                    .errors
                    .push(format!("Error scoring task '{}': {}", task.title, e)),
            }
        }

        // Vec::sort_by is stable, so equal scores keep input order.
        result.tasks.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(
            profile = %self.profile,
            scored = result.tasks.len(),
            failed = result.errors.len(),
            "analysis complete"
        );
        result
    }
}

/// Analyze `inputs` under the named profile.
pub fn analyze(
    inputs: Vec<TaskInput>,
    profile: &str,
    today: NaiveDate,
) -> Result<AnalysisResult, EngineError> {
    Ok(ScoringEngine::from_name(profile)?.analyze(inputs, today))
}

/// Score one task under the default profile.
pub fn score_one(task: &Task, tasks: &[Task], today: NaiveDate) -> Result<ScoredTask, ScoreError> {
    ScoringEngine::default().score_one(task, tasks, today)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
