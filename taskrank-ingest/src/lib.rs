//! taskrank-ingest: turns wire payloads (JSON requests, CSV exports) into task
//! records for the engine, and renders results back.

pub mod csv_import;
pub mod error;
pub mod payload;
pub mod response;
pub mod types;

pub use csv_import::{parse_tasks_csv, parse_tasks_csv_reader};
pub use error::PayloadError;
pub use payload::{parse_analyze_request, parse_tasks};
pub use response::{
    AnalyzeResponse, render_analysis, render_no_tasks, render_payload_error, render_suggest_failure,
    render_suggestions,
};
pub use types::AnalyzeRequest;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Load tasks from a `.csv` export or a JSON file holding either a full
/// request object or a bare task list.
pub fn load_request(path: impl AsRef<Path>) -> Result<AnalyzeRequest> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        return Ok(AnalyzeRequest {
            tasks: parse_tasks_csv(path)?,
            profile: None,
        });
    }

    let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let body: Value =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    let request = match body {
        Value::Array(_) => AnalyzeRequest {
            tasks: parse_tasks(&body)?,
            profile: None,
        },
        _ => parse_analyze_request(&body)?,
    };
    Ok(request)
}
