//! The task list screen state machine.
//!
//! `TaskListScreen` owns the task collection, the compose buffer and the (at most one)
//! edit session. Every operation runs to completion synchronously and never fails:
//! invalid input, such as blank text or an unknown id, is a silent no-op. Callers
//! redraw from [`TaskListScreen::render`] after each mutation.

use tracing::debug;

use crate::intent::Intent;
use crate::task::{TaskCollection, TaskId};
use crate::view::{RowMode, RowView, ScreenView, COMPOSE_PLACEHOLDER, EMPTY_MESSAGE, SCREEN_TITLE};

/// An in-progress edit of one task's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target: TaskId,
    pub draft: String,
}

#[derive(Debug, Default)]
pub struct TaskListScreen {
    tasks: TaskCollection,
    compose: String,
    edit: Option<EditSession>,
}

impl TaskListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn compose(&self) -> &str {
        &self.compose
    }

    /// Target of the active edit session.
    ///
    /// A session whose task has disappeared counts as inactive.
    pub fn editing_id(&self) -> Option<&TaskId> {
        self.active_session().map(|s| &s.target)
    }

    /// Current draft text, if an edit session is active.
    pub fn draft(&self) -> Option<&str> {
        self.active_session().map(|s| s.draft.as_str())
    }

    fn active_session(&self) -> Option<&EditSession> {
        self.edit.as_ref().filter(|s| self.tasks.contains(&s.target))
    }

    /// Replace the compose buffer.
    pub fn set_compose(&mut self, text: impl Into<String>) {
        self.compose = text.into();
    }

    /// Add a task with the trimmed text at the top of the list.
    ///
    /// Blank text is ignored and leaves the compose buffer alone.
    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        let name = text.trim();
        if name.is_empty() {
            debug!("ignoring add with blank text");
            return None;
        }
        let id = self.tasks.prepend(name.to_string());
        self.compose.clear();
        debug!(id = %id, name, count = self.tasks.len(), "task added");
        Some(id)
    }

    /// Add whatever the compose buffer holds.
    pub fn submit_compose(&mut self) -> Option<TaskId> {
        let text = self.compose.clone();
        self.add_task(&text)
    }

    /// Enter edit mode for a task, discarding any other session unsaved.
    ///
    /// Unknown ids are ignored and leave the current session in place.
    pub fn begin_edit(&mut self, id: &TaskId) {
        let Some(task) = self.tasks.get(id) else {
            debug!(id = %id, "ignoring edit of unknown task");
            return;
        };
        if let Some(previous) = self.edit.as_ref().filter(|s| &s.target != id) {
            debug!(discarded = %previous.target, "replacing active edit session");
        }
        self.edit = Some(EditSession {
            target: id.clone(),
            draft: task.name.clone(),
        });
        debug!(id = %id, "edit started");
    }

    /// Replace the draft text of the active session.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        match self.edit.as_mut() {
            Some(session) => session.draft = text.into(),
            None => debug!("ignoring draft update without an edit session"),
        }
    }

    /// Close the active session, renaming the task when the trimmed draft is non-blank.
    ///
    /// Returns whether the task was renamed. The session is closed either way.
    pub fn save_edit(&mut self) -> bool {
        let Some(session) = self.edit.take() else {
            return false;
        };
        let name = session.draft.trim();
        if name.is_empty() {
            debug!(id = %session.target, "blank draft, keeping previous name");
            return false;
        }
        let renamed = self.tasks.rename(&session.target, name.to_string());
        if renamed {
            debug!(id = %session.target, name, "task renamed");
        } else {
            debug!(id = %session.target, "edit target no longer exists");
        }
        renamed
    }

    /// Close the active session without touching the task.
    pub fn cancel_edit(&mut self) {
        if let Some(session) = self.edit.take() {
            debug!(id = %session.target, "edit cancelled");
        }
    }

    /// Remove a task. Unknown ids are ignored.
    ///
    /// An edit session targeting the removed task is closed with it.
    pub fn remove_task(&mut self, id: &TaskId) {
        if self.tasks.remove(id).is_none() {
            debug!(id = %id, "ignoring removal of unknown task");
            return;
        }
        if self.edit.as_ref().is_some_and(|s| &s.target == id) {
            self.edit = None;
        }
        debug!(id = %id, count = self.tasks.len(), "task removed");
    }

    /// Dispatch a user intent.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Compose { text } => self.set_compose(text),
            Intent::Submit => {
                self.submit_compose();
            }
            Intent::Add { text } => {
                self.add_task(&text);
            }
            Intent::BeginEdit { id } => self.begin_edit(&id),
            Intent::UpdateDraft { text } => self.update_draft(text),
            Intent::SaveEdit => {
                self.save_edit();
            }
            Intent::CancelEdit => self.cancel_edit(),
            Intent::Remove { id } => self.remove_task(&id),
        }
    }

    /// Project the current state into a view.
    pub fn render(&self) -> ScreenView {
        let session = self.active_session();
        let rows: Vec<RowView> = self
            .tasks
            .iter()
            .map(|task| {
                let mode = match session {
                    Some(s) if s.target == task.id => RowMode::Editing { draft: s.draft.clone() },
                    _ => RowMode::Display { name: task.name.clone() },
                };
                RowView { id: task.id.clone(), mode }
            })
            .collect();
        let empty_message = rows.is_empty().then_some(EMPTY_MESSAGE);

        ScreenView {
            title: SCREEN_TITLE,
            compose: self.compose.clone(),
            compose_placeholder: COMPOSE_PLACEHOLDER,
            rows,
            empty_message,
        }
    }
}
