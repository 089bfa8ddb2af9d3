//! Response envelopes for analysis results and rejected payloads.

use serde::Serialize;
use serde_json::{Value, json};
use taskrank_core::{AnalysisResult, Suggestions};

use crate::error::PayloadError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Ranked(AnalysisResult),
    Failed { error: String, details: Vec<String> },
}

impl AnalyzeResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalyzeResponse::Ranked(_))
    }
}

/// Any reported error, fatal or per-task, turns the response into a failure.
pub fn render_analysis(result: AnalysisResult) -> AnalyzeResponse {
    if result.has_errors() {
        AnalyzeResponse::Failed {
            error: "Scoring errors occurred".to_string(),
            details: result.errors,
        }
    } else {
        AnalyzeResponse::Ranked(result)
    }
}

pub fn render_suggestions(suggestions: &Suggestions) -> Value {
    json!(suggestions)
}

/// Body for a suggest call with nothing to rank.
pub fn render_no_tasks(message: &str) -> Value {
    json!({ "suggestions": [], "message": message })
}

/// Suggest calls fail as a whole when the analysis reports any error.
pub fn render_suggest_failure(errors: &[String]) -> Value {
    json!({ "error": "Error analyzing tasks", "details": errors })
}

pub fn render_payload_error(err: &PayloadError) -> Value {
    let mut body = json!({ "error": err.to_string() });
    if let PayloadError::MissingFields { fields, .. } = err {
        body["missing_fields"] = json!(fields);
    }
    if let Some(received) = err.received() {
        body["received"] = received.clone();
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taskrank_core::{Profile, ScoringEngine, Task};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 19).unwrap()
    }

    #[test]
    fn test_ranked_response_shape() {
        let tasks = vec![Task::new(1, "Ship", today())];
        let result = ScoringEngine::new(Profile::HighImpact).analyze_tasks(&tasks, today());
        let resp = render_analysis(result);
        assert!(resp.is_success());

        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["profile"], "high_impact");
        let t = &v["tasks"][0];
        let keys = [
            "id",
            "title",
            "due_date",
            "estimated_hours",
            "importance",
            "dependencies",
            "score",
            "breakdown",
            "explanation",
            "is_overdue",
            "overdue_days",
        ];
        for key in keys {
            assert!(t.get(key).is_some(), "missing {key}");
        }
        assert_eq!(t["dependencies"], json!([]));
    }

    #[test]
    fn test_errors_become_failure_envelope() {
        let tasks = vec![Task::new(1, "Loop", today()).with_dependencies([1])];
        let resp = render_analysis(ScoringEngine::default().analyze_tasks(&tasks, today()));
        assert!(!resp.is_success());
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["error"], "Scoring errors occurred");
        assert_eq!(v["details"][0], "Circular dependency detected involving tasks: [1]");
    }

    #[test]
    fn test_suggest_envelopes() {
        let v = render_no_tasks("No tasks found.");
        assert_eq!(v, json!({"suggestions": [], "message": "No tasks found."}));

        let errors = vec!["Circular dependency detected involving tasks: [1, 2]".to_string()];
        let v = render_suggest_failure(&errors);
        assert_eq!(v["error"], "Error analyzing tasks");
        assert_eq!(v["details"][0], "Circular dependency detected involving tasks: [1, 2]");
    }

    #[test]
    fn test_payload_error_body() {
        let err = PayloadError::MissingFields {
            index: 0,
            fields: vec!["title"],
        };
        let v = render_payload_error(&err);
        assert_eq!(v["missing_fields"], json!(["title"]));
        assert!(v.get("received").is_none());

        let err = PayloadError::InvalidImportance {
            task: "x".to_string(),
            received: json!(42),
        };
        assert_eq!(render_payload_error(&err)["received"], 42);
    }
}
