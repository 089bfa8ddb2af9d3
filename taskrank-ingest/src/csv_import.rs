//! CSV task exports.
//!
//! Header row:
//!   id,title,due_date,estimated_hours,importance,dependencies
//!
//! `id` may be blank; `dependencies` is a `;`-separated id list. Bad rows are
//! errors, not skipped.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use taskrank_core::time::parse_date;
use taskrank_core::{TaskId, TaskInput};

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: Option<TaskId>,
    title: String,
    due_date: String,
    estimated_hours: i64,
    importance: i64,
    #[serde(default)]
    dependencies: String,
}

fn parse_dependency_list(raw: &str) -> Result<Vec<TaskId>> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<TaskId>().with_context(|| format!("invalid dependency id '{s}'")))
        .collect()
}

/// Parse task rows from any reader.
pub fn parse_tasks_csv_reader<R: Read>(reader: R) -> Result<Vec<TaskInput>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut tasks = Vec::new();
    for (i, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = result.with_context(|| format!("line {line}"))?;

        tasks.push(TaskInput {
            id: row.id,
            due_date: parse_date(&row.due_date).with_context(|| format!("line {line}"))?,
            estimated_hours: row.estimated_hours,
            importance: row.importance,
            dependencies: parse_dependency_list(&row.dependencies)
                .with_context(|| format!("line {line}"))?
                .into_iter()
                .collect(),
            title: row.title,
        });
    }

    tracing::debug!(rows = tasks.len(), "parsed task csv");
    Ok(tasks)
}

/// Parse a CSV file of tasks.
pub fn parse_tasks_csv(path: impl AsRef<Path>) -> Result<Vec<TaskInput>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_tasks_csv_reader(file).with_context(|| format!("parsing {}", path.display()))
}
