//! Render-ready projection of the screen state.
//!
//! These types carry no behaviour. The terminal UI draws them, and the replay
//! command serialises them.

use serde::Serialize;

use crate::task::TaskId;

/// Heading shown above the compose row.
pub const SCREEN_TITLE: &str = "To-Do List";
/// Placeholder shown in the compose field while it is empty.
pub const COMPOSE_PLACEHOLDER: &str = "Add a new task";
/// Message shown in place of the list when there are no tasks.
pub const EMPTY_MESSAGE: &str = "Nothing yet - add your first task!";

/// A full snapshot of what the screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    pub title: &'static str,
    pub compose: String,
    pub compose_placeholder: &'static str,
    pub rows: Vec<RowView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: TaskId,
    #[serde(flatten)]
    pub mode: RowMode,
}

/// Display mode offers edit/delete; editing mode offers save/delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RowMode {
    Display { name: String },
    Editing { draft: String },
}

impl RowView {
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, RowMode::Editing { .. })
    }
}
