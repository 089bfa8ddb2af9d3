//! JSON analyze-request parsing.
//!
//! Expected shape:
//!   {"tasks": [{"id": 1, "title": "...", "due_date": "2026-02-20",
//!               "estimated_hours": 4, "importance": 7, "dependencies": [2, 3]}],
//!    "profile": "smart_balance"}
//!
//! Checks run per task in order and the first failure rejects the request.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use taskrank_core::{Profile, TaskId, TaskInput};

use crate::error::PayloadError;
use crate::types::AnalyzeRequest;

const REQUIRED_FIELDS: [&str; 4] = ["title", "due_date", "estimated_hours", "importance"];

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

fn is_iso_date(s: &str) -> bool {
    ISO_DATE.is_match(s)
}

/// Parse a full request body (`tasks` + optional `profile`).
pub fn parse_analyze_request(body: &Value) -> Result<AnalyzeRequest, PayloadError> {
    let obj = body
        .as_object()
        .ok_or_else(|| PayloadError::InvalidInput("expected a JSON object".to_string()))?;

    let profile = match obj.get("profile") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.parse::<Profile>().map_err(|_| {
            PayloadError::InvalidInput(format!("profile: \"{name}\" is not a valid choice."))
        })?),
        Some(_) => return Err(PayloadError::InvalidInput("profile: expected a string".to_string())),
    };

    let raw_tasks = obj
        .get("tasks")
        .ok_or_else(|| PayloadError::InvalidInput("tasks: this field is required.".to_string()))?;

    Ok(AnalyzeRequest {
        tasks: parse_tasks(raw_tasks)?,
        profile,
    })
}

/// Parse a bare list of task objects.
pub fn parse_tasks(raw: &Value) -> Result<Vec<TaskInput>, PayloadError> {
    let items = raw
        .as_array()
        .ok_or_else(|| PayloadError::InvalidInput("tasks: expected a list of items".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let obj = item.as_object().ok_or_else(|| {
                PayloadError::InvalidInput(format!(
                    "tasks[{index}]: expected a dictionary of items"
                ))
            })?;
            parse_task(index, obj)
        })
        .collect()
}

fn parse_task(index: usize, obj: &Map<String, Value>) -> Result<TaskInput, PayloadError> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|f| !obj.contains_key(*f))
        .collect();
    if !missing.is_empty() {
        return Err(PayloadError::MissingFields {
            index,
            fields: missing,
        });
    }

    let title = match &obj["title"] {
        Value::String(s) => s.clone(),
        other => {
            return Err(PayloadError::InvalidField {
                index,
                field: "title",
                received: other.clone(),
            });
        }
    };

    let id = match obj.get("id") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_i64().ok_or_else(|| PayloadError::InvalidField {
            index,
            field: "id",
            received: v.clone(),
        })?),
    };

    let due_raw = &obj["due_date"];
    let due_date = due_raw
        .as_str()
        .filter(|s| is_iso_date(s))
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or_else(|| PayloadError::InvalidDueDate {
            task: title.clone(),
            received: due_raw.clone(),
        })?;

    let hours_raw = &obj["estimated_hours"];
    let estimated_hours = hours_raw
        .as_i64()
        .filter(|h| *h >= 0)
        .ok_or_else(|| PayloadError::InvalidHours {
            task: title.clone(),
            received: hours_raw.clone(),
        })?;

    let importance_raw = &obj["importance"];
    let importance = importance_raw
        .as_i64()
        .filter(|i| (1..=10).contains(i))
        .ok_or_else(|| PayloadError::InvalidImportance {
            task: title.clone(),
            received: importance_raw.clone(),
        })?;

    let dependencies = match obj.get("dependencies") {
        None => BTreeSet::new(),
        Some(Value::Array(deps)) => deps
            .iter()
            .map(|d| {
                d.as_i64().ok_or_else(|| PayloadError::InvalidDependency {
                    task: title.clone(),
                    received: d.clone(),
                })
            })
            .collect::<Result<BTreeSet<TaskId>, _>>()?,
        Some(other) => {
            return Err(PayloadError::InvalidDependencies {
                task: title,
                received: other.clone(),
            });
        }
    };

    Ok(TaskInput {
        id,
        title,
        due_date,
        estimated_hours,
        importance,
        dependencies,
    })
}
