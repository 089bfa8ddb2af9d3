//! Top-N suggestions with a one-line summary.

use serde::{Deserialize, Serialize};

use crate::engine::AnalysisResult;
use crate::profile::Profile;
use crate::task::ScoredTask;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub suggestions: Vec<ScoredTask>,
    pub summary: String,
    pub profile: Profile,
}

/// Take the `limit` best-ranked tasks from `result`.
pub fn suggest(result: &AnalysisResult, limit: usize) -> Suggestions {
    let top: Vec<ScoredTask> = result.tasks.iter().take(limit).cloned().collect();

    let summary = if top.is_empty() {
        "No tasks available for suggestions.".to_string()
    } else {
        top.iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {}: {}", i + 1, s.task.title, s.explanation))
            .collect::<Vec<_>>()
            .join(" ")
    };

    Suggestions {
        suggestions: top,
        summary,
        profile: result.profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ScoringEngine;
    use crate::task::Task;
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_suggest_takes_top_three() {
        let tasks: Vec<Task> = (1..=5)
            .map(|i| Task::new(i, format!("T{i}"), today() + Duration::days(i * 3)))
            .collect();
        let result = ScoringEngine::default().analyze_tasks(&tasks, today());
        let s = suggest(&result, DEFAULT_SUGGESTION_LIMIT);

        assert_eq!(s.suggestions.len(), 3);
        assert_eq!(s.suggestions[0].task.id, 1);
        assert!(s.summary.starts_with("1. T1: "));
        assert!(s.summary.contains(" 2. T2: "));
        assert!(s.summary.contains(" 3. T3: "));
    }

    #[test]
    fn test_suggest_empty() {
        let result = ScoringEngine::default().analyze_tasks(&[], today());
        let s = suggest(&result, 3);
        assert!(s.suggestions.is_empty());
        assert_eq!(s.summary, "No tasks available for suggestions.");
        assert_eq!(s.profile, Profile::SmartBalance);
    }
}
