use clap::Subcommand;
use rexx_core::todo::normalize_todo_text;
use rexx_core::{Event, FocusApp, Todo};
use uuid::Uuid;

use super::{CmdResult, Output};

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a todo
    Add {
        /// Todo text
        text: String,
    },
    /// List todos
    List,
    /// Mark a todo done, or reopen it
    Toggle {
        /// Todo id or unique id prefix
        id: String,
    },
    /// Delete a todo
    Delete {
        /// Todo id or unique id prefix
        id: String,
    },
}

/// Resolve a full id or a unique prefix of one.
pub fn resolve_todo(app: &FocusApp, prefix: &str) -> Result<Uuid, String> {
    if prefix.trim().is_empty() {
        return Err("todo id must not be empty".to_string());
    }
    match app.todos().find_by_prefix(prefix).as_slice() {
        [todo] => Ok(todo.id),
        [] => Err(format!("no todo matches '{prefix}'")),
        matches => Err(format!(
            "'{prefix}' is ambiguous ({} todos match)",
            matches.len()
        )),
    }
}

fn short_id(todo: &Todo) -> String {
    todo.id.to_string()[..8].to_string()
}

fn todo_line(todo: &Todo, active: bool) -> String {
    let mark = if todo.completed { "x" } else { " " };
    let pointer = if active { " <- active" } else { "" };
    format!("[{mark}] {}  {}{pointer}", short_id(todo), todo.text)
}

pub fn run(app: &mut FocusApp, action: TodoAction, out: Output) -> CmdResult {
    match action {
        TodoAction::Add { text } => {
            let text = normalize_todo_text(&text)?;
            let todo = app.add_todo(text);
            out.emit(&todo, || format!("added {}  {}", short_id(&todo), todo.text))
        }
        TodoAction::List => {
            let todos = app.todos();
            let active = todos.active_todo_id();
            out.emit(&todos.todos(), || {
                if todos.todos().is_empty() {
                    return "no todos".to_string();
                }
                let mut lines: Vec<String> = todos
                    .todos()
                    .iter()
                    .map(|t| todo_line(t, active == Some(t.id)))
                    .collect();
                lines.push(format!("{} pending", todos.pending_count()));
                lines.join("\n")
            })
        }
        TodoAction::Toggle { id } => {
            let id = resolve_todo(app, &id)?;
            let event = app
                .toggle_todo(id)
                .ok_or_else(|| format!("todo {id} disappeared"))?;
            let done = matches!(event, Event::TodoToggled { completed: true, .. });
            out.emit(&event, || {
                if done {
                    "completed".to_string()
                } else {
                    "reopened".to_string()
                }
            })
        }
        TodoAction::Delete { id } => {
            let id = resolve_todo(app, &id)?;
            let removed = app
                .delete_todo(id)
                .ok_or_else(|| format!("todo {id} disappeared"))?;
            out.emit(&removed, || format!("deleted {}", removed.text))
        }
    }
}
