//! Task data structure and the ordered collection that owns it.
//!
//! Tasks live only in memory. The collection keeps them newest-first and hands out
//! identifiers from a counter that is never rewound, so an id is unique for the
//! lifetime of the collection even after the task carrying it is deleted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque task identifier.
///
/// Callers should treat the value as a token: compare it, display it, send it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        TaskId(value.to_string())
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
}

/// Newest-first list of tasks.
#[derive(Debug, Default)]
pub struct TaskCollection {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task at the front and return its freshly issued id.
    ///
    /// The name is stored as given; trimming and emptiness checks belong to the caller.
    pub fn prepend(&mut self, name: String) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id.to_string());
        self.tasks.insert(0, Task { id: id.clone(), name });
        id
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Replace the name of an existing task. Returns false when the id is unknown.
    pub fn rename(&mut self, id: &TaskId, name: String) -> bool {
        match self.tasks.iter_mut().find(|t| &t.id == id) {
            Some(task) => {
                task.name = name;
                true
            }
            None => false,
        }
    }

    /// Remove a task, keeping the relative order of the rest.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let idx = self.position(id)?;
        Some(self.tasks.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
