//! Per-factor scoring curves. Pure functions of their inputs.

use chrono::NaiveDate;

use crate::error::ScoreError;
use crate::task::Task;

/// Score for tasks outside the dependency graph entirely.
pub const NEUTRAL_DEPENDENCY_SCORE: f64 = 50.0;

/// Urgency from days until due.
///
/// Overdue tasks get a negative raw value (`-days_late * 10`); the engine
/// rescales it with the profile's overdue multiplier.
pub fn urgency_score(due_date: NaiveDate, today: NaiveDate) -> f64 {
    let days = (due_date - today).num_days();

    match days {
        d if d < 0 => -(d.abs() as f64) * 10.0,
        0 => 100.0,
        1 => 90.0,
        2..=3 => 70.0,
        4..=7 => 50.0,
        8..=14 => 30.0,
        15..=30 => 15.0,
        d => (30.0 - (d - 30) as f64 * 0.5).max(5.0),
    }
}

/// Linear rescale of 1-10 onto 0-100.
pub fn importance_score(importance: i64) -> Result<f64, ScoreError> {
    if !(1..=10).contains(&importance) {
        return Err(ScoreError::ImportanceOutOfRange(importance));
    }
    Ok(importance as f64 / 10.0 * 100.0)
}

/// Smaller estimates score higher.
pub fn effort_score(estimated_hours: i64) -> Result<f64, ScoreError> {
    let score = match estimated_hours {
        h if h < 0 => return Err(ScoreError::NegativeHours(h)),
        0..=1 => 100.0,
        2 => 80.0,
        3..=4 => 60.0,
        5..=8 => 40.0,
        9..=16 => 20.0,
        h => (30.0 - (h - 16) as f64 * 0.5).max(5.0),
    };
    Ok(score)
}

/// Number of tasks in `tasks` that list `task` as a dependency.
pub fn blocking_count(task: &Task, tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.depends_on(task.id)).count()
}

/// Rewards tasks that unblock others, slightly penalizes tasks with many
/// prerequisites. Reads `tasks`, never writes.
///
/// A task with no prerequisites that still blocks others goes through the
/// formula, so root blockers outrank independent tasks.
pub fn dependency_score(task: &Task, tasks: &[Task]) -> f64 {
    let blocking = blocking_count(task, tasks);
    if task.dependencies.is_empty() && blocking == 0 {
        return NEUTRAL_DEPENDENCY_SCORE;
    }

    let blocking = blocking as f64;
    let blocking_score = (50.0 + blocking * 10.0).min(100.0);
    let dependency_count_score = (70.0 - task.dependencies.len() as f64 * 5.0).max(30.0);

    blocking_score * 0.6 + dependency_count_score * 0.4
}
