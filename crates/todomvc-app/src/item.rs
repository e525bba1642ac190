#![forbid(unsafe_code)]

//! Per-row stores: one item store plus its field sub-stores.

use todomvc_runtime::reactive::{Binding, bind_mapped};
use todomvc_runtime::{Handler, Store};

use crate::lenses::{COMPLETED, EDITING, TEXT};
use crate::model::ToDo;

/// The stores a rendered row binds to.
///
/// All four write back into the root list; none of them owns data.
#[derive(Clone, Debug)]
pub struct TodoItem {
    store: Store<ToDo>,
    text: Store<String>,
    completed: Store<bool>,
    editing: Store<bool>,
}

impl TodoItem {
    /// Build the field stores for an item store.
    #[must_use]
    pub fn new(store: Store<ToDo>) -> Self {
        Self {
            text: store.sub(TEXT),
            completed: store.sub(COMPLETED),
            editing: store.sub(EDITING),
            store,
        }
    }

    /// The item's id (also the item store's name).
    #[must_use]
    pub fn id(&self) -> &str {
        self.store.id()
    }

    #[must_use]
    pub fn store(&self) -> &Store<ToDo> {
        &self.store
    }

    #[must_use]
    pub fn text(&self) -> &Store<String> {
        &self.text
    }

    #[must_use]
    pub fn completed(&self) -> &Store<bool> {
        &self.completed
    }

    #[must_use]
    pub fn editing(&self) -> &Store<bool> {
        &self.editing
    }

    /// Flip `completed`.
    #[must_use]
    pub fn toggle(&self) -> Handler<()> {
        self.completed.handle(|done, ()| !done)
    }

    /// Enter inline-edit mode (double click on the label).
    pub fn start_editing(&self) {
        self.editing.set(true);
    }

    /// Leave inline-edit mode, storing `text` (enter or blur on the input).
    pub fn finish_editing(&self, text: impl Into<String>) {
        self.text.set(text.into());
        self.editing.set(false);
    }

    /// CSS-style classes for the row: `completed`, `editing`.
    #[must_use]
    pub fn class_list(&self) -> Binding<Vec<&'static str>> {
        bind_mapped(&self.store, |todo: &ToDo| {
            let mut classes = Vec::new();
            if todo.completed {
                classes.push("completed");
            }
            if todo.editing {
                classes.push("editing");
            }
            classes
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> (Store<Vec<ToDo>>, TodoItem) {
        let todo = ToDo::with_id("t1", "walk dog");
        let root = Store::new("todos", vec![todo.clone(), ToDo::with_id("t2", "other")]);
        let item = TodoItem::new(root.sub_item(&todo));
        (root, item)
    }

    #[test]
    fn field_stores_are_named_after_item() {
        let (_root, item) = root();
        assert_eq!(item.id(), "t1");
        assert_eq!(item.text().id(), "t1.text");
        assert_eq!(item.completed().id(), "t1.completed");
    }

    #[test]
    fn toggle_writes_into_root() {
        let (root, item) = root();
        item.toggle().trigger();
        assert!(root.current()[0].completed);
        assert!(!root.current()[1].completed);
        assert!(item.completed().current());
    }

    #[test]
    fn edit_cycle() {
        let (root, item) = root();
        item.start_editing();
        assert!(root.current()[0].editing);
        assert_eq!(item.class_list().get(), vec!["editing"]);

        item.finish_editing("walk cat");
        let todos = root.current();
        let todo = &todos[0];
        assert_eq!(todo.text, "walk cat");
        assert!(!todo.editing);
    }

    #[test]
    fn class_list_tracks_flags() {
        let (_root, item) = root();
        let classes = item.class_list();
        assert!(classes.get().is_empty());
        item.completed().set(true);
        assert_eq!(classes.get(), vec!["completed"]);
    }
}
