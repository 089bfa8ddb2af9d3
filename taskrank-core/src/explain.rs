//! Human-readable explanation of a score.
//!
//! Clause order is fixed: overdue, urgency, importance, effort, blocks,
//! depends-on. Bands are applied to unrounded component scores.

use crate::task::ScoreBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExplainContext {
    /// Days late, 0 when on time.
    pub overdue_days: i64,
    pub blocking: usize,
    pub dependencies: usize,
}

pub fn explain(breakdown: &ScoreBreakdown, ctx: ExplainContext) -> String {
    let mut parts: Vec<String> = Vec::new();

    if ctx.overdue_days > 0 {
        parts.push(format!(
            "⚠️ OVERDUE by {} day(s) - CRITICAL PRIORITY",
            ctx.overdue_days
        ));
    }

    parts.push(band(breakdown.urgency, 70.0, 30.0, [
        "High urgency (due soon)",
        "Moderate urgency",
        "Low urgency (plenty of time)",
    ]));

    parts.push(band(breakdown.importance, 70.0, 40.0, [
        "High importance",
        "Moderate importance",
        "Low importance",
    ]));

    parts.push(band(breakdown.effort, 70.0, 40.0, [
        "Quick task (low effort)",
        "Moderate effort required",
        "High effort task",
    ]));

    if ctx.blocking > 0 {
        parts.push(format!("Blocks {} other task(s)", ctx.blocking));
    }
    if ctx.dependencies > 0 {
        parts.push(format!("Depends on {} task(s)", ctx.dependencies));
    }

    format!("{}.", parts.join(". "))
}

fn band(value: f64, high: f64, moderate: f64, labels: [&str; 3]) -> String {
    let label = if value >= high {
        labels[0]
    } else if value >= moderate {
        labels[1]
    } else {
        labels[2]
    };
    label.to_string()
}
