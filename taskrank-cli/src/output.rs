//! Plain-text rendering for terminal output.

use std::fmt::Write;

use taskrank_core::{AnalysisResult, Profile, Suggestions};

const TITLE_WIDTH: usize = 32;

fn clip(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        return title.to_string();
    }
    let mut s: String = title.chars().take(TITLE_WIDTH - 1).collect();
    s.push('…');
    s
}

pub fn ranking(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Ranked tasks ({})\n", result.profile);
    let _ = writeln!(
        out,
        "{:>3}  {:>7}  {:<w$}  {}",
        "#",
        "score",
        "title",
        "why",
        w = TITLE_WIDTH
    );

    for (i, s) in result.tasks.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:>7.2}  {:<w$}  {}",
            i + 1,
            s.score,
            clip(&s.task.title),
            s.explanation,
            w = TITLE_WIDTH
        );
    }
    out
}

pub fn suggestions(s: &Suggestions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Work on next ({})\n", s.profile);
    if s.suggestions.is_empty() {
        let _ = writeln!(out, "{}", s.summary);
        return out;
    }
    for (i, t) in s.suggestions.iter().enumerate() {
        let _ = writeln!(out, "{}. {} [{:.2}]", i + 1, t.task.title, t.score);
        let _ = writeln!(out, "   {}", t.explanation);
    }
    out
}

pub fn profiles() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>8} {:>10} {:>7} {:>10} {:>8}",
        "profile", "urgency", "importance", "effort", "dependency", "overdue×"
    );
    for p in Profile::ALL {
        let w = p.weights();
        let marker = if p == Profile::default() { " (default)" } else { "" };
        let _ = writeln!(
            out,
            "{:<16} {:>8.2} {:>10.2} {:>7.2} {:>10.2} {:>8.1}{}",
            p.name(),
            w.urgency,
            w.importance,
            w.effort,
            w.dependency,
            w.overdue_multiplier,
            marker
        );
    }
    out
}
