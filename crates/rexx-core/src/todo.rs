//! Todo list with a single "active" pointer.
//!
//! The list is persisted as the `todos` record; the active pointer lives only
//! in memory and is dropped automatically when its todo is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Result of [`TodoList::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// false -> true; counts as a finished task.
    Completed,
    /// true -> false; nothing is un-counted.
    Reopened,
}

/// Trim user text and reject it when nothing is left.
pub fn normalize_todo_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(default)]
    todos: Vec<Todo>,
    #[serde(skip)]
    active_todo_id: Option<Uuid>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: Uuid) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn active_todo_id(&self) -> Option<Uuid> {
        self.active_todo_id
    }

    pub fn active_todo(&self) -> Option<&Todo> {
        self.active_todo_id.and_then(|id| self.get(id))
    }

    /// Todos whose id starts with `prefix` (case-insensitive hex). A blank
    /// prefix matches nothing.
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&Todo> {
        let prefix = prefix.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.todos
            .iter()
            .filter(|t| t.id.to_string().starts_with(&prefix))
            .collect()
    }

    /// Append a new todo. `text` is expected to be trimmed and non-empty.
    pub fn add(&mut self, text: impl Into<String>, now: DateTime<Utc>) -> &Todo {
        self.todos.push(Todo {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            created_at: now,
        });
        let todo = &self.todos[self.todos.len() - 1];
        tracing::debug!(id = %todo.id, "todo added");
        todo
    }

    /// Flip `completed`. `None` when the id is unknown.
    pub fn toggle(&mut self, id: Uuid) -> Option<ToggleOutcome> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.completed = !todo.completed;
        Some(if todo.completed {
            ToggleOutcome::Completed
        } else {
            ToggleOutcome::Reopened
        })
    }

    /// Remove a todo, clearing the active pointer if it pointed here.
    pub fn delete(&mut self, id: Uuid) -> Option<Todo> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        if self.active_todo_id == Some(id) {
            self.active_todo_id = None;
        }
        Some(self.todos.remove(index))
    }

    /// Point at a todo, or clear with `None`. Returns false and leaves the
    /// pointer alone when the id is unknown.
    pub fn set_active(&mut self, id: Option<Uuid>) -> bool {
        match id {
            Some(id) if self.get(id).is_none() => false,
            other => {
                self.active_todo_id = other;
                true
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }
}
