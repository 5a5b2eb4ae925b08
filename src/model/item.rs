// File: ./src/model/item.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_id() -> String {
    Uuid::new_v4().to_string()
}

/// A single to-do entry.
///
/// `id` is assigned at creation and never changes afterwards; `text` and
/// `completed` are mutated through the store only.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default = "default_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates a new active task with a freshly generated id.
    /// The caller is responsible for trimming `text` beforehand.
    pub fn new(text: &str) -> Self {
        Self {
            id: default_id(),
            text: text.to_string(),
            completed: false,
        }
    }
}

/// Result of a rename request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RenameOutcome {
    /// Text was replaced.
    Renamed,
    /// The new text was empty, so the task was removed instead.
    Deleted,
    /// No task with that id; nothing happened.
    NotFound,
}
