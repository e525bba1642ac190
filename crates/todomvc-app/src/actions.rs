#![forbid(unsafe_code)]

//! Pure list updates behind the root store's handlers, plus the values the
//! footer derives from the list.
//!
//! Every function takes the current list by value and returns the next one.
//! Inputs that cannot apply (empty text, unknown id) return the list as is.

use tracing::debug;

use crate::model::ToDo;

/// Append a new active task. Empty text leaves the list unchanged.
#[must_use]
pub fn add(mut todos: Vec<ToDo>, text: String) -> Vec<ToDo> {
    if text.is_empty() {
        debug!("ignoring empty to-do");
        return todos;
    }
    todos.push(ToDo::new(text));
    todos
}

/// Drop the task with `id`, if present.
#[must_use]
pub fn remove(mut todos: Vec<ToDo>, id: &str) -> Vec<ToDo> {
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        debug!(id, "remove of unknown to-do ignored");
    }
    todos
}

/// Set every task's `completed` flag to `completed`.
#[must_use]
pub fn toggle_all(todos: Vec<ToDo>, completed: bool) -> Vec<ToDo> {
    todos
        .into_iter()
        .map(|t| ToDo { completed, ..t })
        .collect()
}

/// Drop every completed task.
#[must_use]
pub fn clear_completed(mut todos: Vec<ToDo>) -> Vec<ToDo> {
    todos.retain(|t| !t.completed);
    todos
}

/// Number of tasks not yet completed.
#[must_use]
pub fn count_active(todos: &[ToDo]) -> usize {
    todos.iter().filter(|t| !t.completed).count()
}

/// True when there is at least one task and all are completed.
#[must_use]
pub fn all_completed(todos: &[ToDo]) -> bool {
    !todos.is_empty() && todos.iter().all(|t| t.completed)
}

/// Footer text for `count` active tasks.
#[must_use]
pub fn items_left_label(count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("{count} {noun} left")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ToDo> {
        let mut done = ToDo::with_id("a", "done");
        done.completed = true;
        vec![done, ToDo::with_id("b", "open")]
    }

    #[test]
    fn add_appends_active_item() {
        let next = add(sample(), "new".into());
        assert_eq!(next.len(), 3);
        let last = next.last().expect("appended");
        assert_eq!(last.text, "new");
        assert!(!last.completed && !last.editing);
    }

    #[test]
    fn add_empty_is_ignored() {
        assert_eq!(add(sample(), String::new()), sample());
    }

    #[test]
    fn remove_by_id() {
        let next = remove(sample(), "a");
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "b");
        assert_eq!(remove(sample(), "zzz"), sample());
    }

    #[test]
    fn toggle_all_sets_every_flag() {
        let next = toggle_all(sample(), true);
        assert!(next.iter().all(|t| t.completed));
        let next = toggle_all(next, false);
        assert!(next.iter().all(|t| !t.completed));
    }

    #[test]
    fn clear_completed_keeps_active() {
        let next = clear_completed(sample());
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "b");
    }

    #[test]
    fn derived_values() {
        assert_eq!(count_active(&sample()), 1);
        assert_eq!(count_active(&[]), 0);
        assert!(!all_completed(&[]));
        assert!(!all_completed(&sample()));
        assert!(all_completed(&toggle_all(sample(), true)));
    }

    #[test]
    fn label_pluralizes() {
        assert_eq!(items_left_label(0), "0 items left");
        assert_eq!(items_left_label(1), "1 item left");
        assert_eq!(items_left_label(2), "2 items left");
    }
}
