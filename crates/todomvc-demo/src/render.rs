#![forbid(unsafe_code)]

//! Text rendering of the to-do list.
//!
//! [`render`] draws the header, the visible rows and the footer from the
//! store's current values. [`Screen`] subscribes to the values the drawing
//! depends on and reports when a redraw is due, so the front end only prints
//! after something it shows has changed.

use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::Rc;

use todomvc_app::{FILTERS, TodoItem, TodoStore};
use todomvc_runtime::BindingScope;

/// Draw the whole screen as text.
#[must_use]
pub fn render(store: &TodoStore) -> String {
    let mut out = String::from("todos\n");
    let items = store.items();
    let total = store.store().data().with(Vec::len);

    if total > 0 {
        let mark = if store.all_checked().get() { 'x' } else { ' ' };
        let _ = writeln!(out, "   [{mark}] mark all as complete");
    }
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}", render_row(index + 1, item));
    }
    if total > 0 {
        let _ = writeln!(out, "{}", render_footer(store));
    }
    out
}

fn render_row(number: usize, item: &TodoItem) -> String {
    let todo = item.store().current();
    let mark = if todo.completed { 'x' } else { ' ' };
    let classes = item.class_list().get();
    if classes.contains(&"editing") {
        format!("{number:>2}. [{mark}] > {} <", todo.text)
    } else {
        format!("{number:>2}. [{mark}] {}", todo.text)
    }
}

fn render_footer(store: &TodoStore) -> String {
    let router = store.router();
    let links: Vec<String> = FILTERS
        .iter()
        .map(|filter| {
            if router.is_current(filter.route) {
                format!("[{}]", filter.label)
            } else {
                filter.label.to_string()
            }
        })
        .collect();

    let mut footer = format!("{}  {}", store.items_left_label(), links.join(" "));
    let has_completed = store
        .store()
        .data()
        .with(|todos| todos.iter().any(|t| t.completed));
    if has_completed {
        footer.push_str("  (clear completed)");
    }
    footer
}

/// Tracks whether anything on screen changed since the last draw.
#[derive(Debug)]
pub struct Screen {
    dirty: Rc<Cell<bool>>,
    _scope: BindingScope,
}

impl Screen {
    /// Subscribe to the store's rendered values. Starts dirty.
    #[must_use]
    pub fn attach(store: &TodoStore) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let mark = |dirty: &Rc<Cell<bool>>| {
            let dirty = Rc::clone(dirty);
            move || dirty.set(true)
        };

        let mut scope = BindingScope::new();
        let on_rows = mark(&dirty);
        let on_count = mark(&dirty);
        let on_checked = mark(&dirty);
        let on_route = mark(&dirty);
        let on_list = mark(&dirty);
        scope.hold(store.watch_rows(move |_| on_rows()));
        scope
            .subscribe(store.count(), move |_| on_count())
            .subscribe(store.all_checked(), move |_| on_checked())
            .subscribe(store.router(), move |_| on_route())
            .subscribe(&store.data(), move |_| on_list());

        Self {
            dirty,
            _scope: scope,
        }
    }

    /// Whether a redraw is due; clears the flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }
}
