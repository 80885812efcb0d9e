//! User intents understood by the task list screen.
//!
//! The terminal UI produces these from key presses; the replay command reads them as
//! newline-delimited JSON, one object per line tagged by `op`.

use serde::Deserialize;

use crate::task::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Intent {
    /// Replace the compose field contents.
    Compose { text: String },
    /// Add whatever the compose field holds.
    Submit,
    /// Add the given text directly.
    Add { text: String },
    BeginEdit { id: TaskId },
    UpdateDraft { text: String },
    SaveEdit,
    CancelEdit,
    Remove { id: TaskId },
}

impl Intent {
    /// Parse one line of an intent script.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse_line(line: &str) -> serde_json::Result<Option<Intent>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        serde_json::from_str(trimmed).map(Some)
    }
}
