#![forbid(unsafe_code)]

//! The to-do entity.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use todomvc_runtime::Keyed;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a process-unique to-do id.
#[must_use]
pub fn next_id() -> String {
    format!("todo-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// One task in the list.
///
/// `id` is assigned at creation and never changes; it is the key used to
/// find the task's store and its rendered row. `editing` is a UI flag and is
/// not serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDo {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing)]
    pub editing: bool,
}

impl ToDo {
    /// A new, active task with a fresh id.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(next_id(), text)
    }

    /// A new, active task with a caller-chosen id.
    #[must_use]
    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            editing: false,
        }
    }
}

impl Keyed for ToDo {
    type Key = String;

    fn key(&self) -> &String {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_defaults() {
        let todo = ToDo::new("Buy milk");
        assert_eq!(todo.text, "Buy milk");
        assert!(!todo.completed);
        assert!(!todo.editing);
        assert!(todo.id.starts_with("todo-"));
    }

    #[test]
    fn ids_are_unique() {
        let a = ToDo::new("a");
        let b = ToDo::new("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn editing_is_not_serialized() {
        let mut todo = ToDo::with_id("x", "write docs");
        todo.editing = true;
        let json = serde_json::to_string(&todo).expect("serialize");
        assert_eq!(json, r#"{"id":"x","text":"write docs","completed":false}"#);

        let back: ToDo = serde_json::from_str(&json).expect("deserialize");
        assert!(!back.editing);
        assert_eq!(back.id, "x");
    }
}
