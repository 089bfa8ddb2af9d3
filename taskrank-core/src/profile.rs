//! Weighting profiles: a closed catalog of immutable coefficient sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Coefficients combining the four factor scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
    /// Applied to raw urgency only when a task is late.
    pub overdue_multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Quick wins first.
    FastestWins,
    /// Importance dominates.
    HighImpact,
    /// Deadlines dominate.
    DeadlineDriven,
    #[default]
    SmartBalance,
}

impl Profile {
    pub const ALL: [Profile; 4] = [
        Profile::FastestWins,
        Profile::HighImpact,
        Profile::DeadlineDriven,
        Profile::SmartBalance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Profile::FastestWins => "fastest_wins",
            Profile::HighImpact => "high_impact",
            Profile::DeadlineDriven => "deadline_driven",
            Profile::SmartBalance => "smart_balance",
        }
    }

    pub fn weights(&self) -> Weights {
        match self {
            Profile::FastestWins => Weights {
                urgency: 0.2,
                importance: 0.1,
                effort: 0.6,
                dependency: 0.1,
                overdue_multiplier: 2.0,
            },
            Profile::HighImpact => Weights {
                urgency: 0.2,
                importance: 0.5,
                effort: 0.1,
                dependency: 0.2,
                overdue_multiplier: 2.5,
            },
            Profile::DeadlineDriven => Weights {
                urgency: 0.6,
                importance: 0.2,
                effort: 0.1,
                dependency: 0.1,
                overdue_multiplier: 3.0,
            },
            Profile::SmartBalance => Weights {
                urgency: 0.35,
                importance: 0.3,
                effort: 0.2,
                dependency: 0.15,
                overdue_multiplier: 2.5,
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| EngineError::UnknownProfile {
                name: s.to_string(),
                choices: Profile::ALL.map(|p| p.name()).join(", "),
            })
    }
}
