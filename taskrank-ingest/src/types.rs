use serde::{Deserialize, Serialize};
use taskrank_core::{Profile, TaskInput};

/// A validated analyze request, ready for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub tasks: Vec<TaskInput>,
    /// `None` when the payload did not name one.
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl AnalyzeRequest {
    pub fn profile_or_default(&self) -> Profile {
        self.profile.unwrap_or_default()
    }
}
