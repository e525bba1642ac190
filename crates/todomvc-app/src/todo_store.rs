#![forbid(unsafe_code)]

//! The root to-do store and everything derived from it.
//!
//! [`TodoStore`] is built once at startup and handed by reference to the
//! front end. It owns the canonical list; every other value here is a view
//! of it.
//!
//! # Invariants
//!
//! 1. The root list is the only state. Item and field stores write back
//!    into it.
//! 2. `count` and `all_checked` republish only when their value changes.
//! 3. The visible list follows both the list and the router, in list order.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Empty text on add | Blank input | List unchanged |
//! | Unknown id on remove | Stale row | List unchanged |
//! | Unknown route | Typo in fragment | All items shown |

use todomvc_runtime::reactive::{Computed, ReadObservable, Subscription};
use todomvc_runtime::{Each, Handler, KeyedSnapshot, Store};
use tracing::info;

use crate::actions;
use crate::config::TodoConfig;
use crate::filter::{Filter, visible_for_route};
use crate::item::TodoItem;
use crate::model::ToDo;
use crate::router::Router;

/// Root store, handlers and derived views of the to-do list.
#[derive(Clone, Debug)]
pub struct TodoStore {
    store: Store<Vec<ToDo>>,
    router: Router,
    add: Handler<String>,
    remove: Handler<String>,
    toggle_all: Handler<bool>,
    clear_completed: Handler<()>,
    count: Computed<usize>,
    all_checked: Computed<bool>,
    visible: Computed<Vec<ToDo>>,
    each: Each<ToDo>,
}

impl TodoStore {
    /// An empty list named `name`, filtered by `router`.
    #[must_use]
    pub fn new(name: &str, router: Router) -> Self {
        Self::with_items(name, router, Vec::new())
    }

    /// Build from loaded configuration.
    #[must_use]
    pub fn from_config(config: &TodoConfig) -> Self {
        info!(
            store = %config.store_name,
            route = %config.initial_route,
            "creating to-do store"
        );
        Self::new(&config.store_name, Router::new(&config.initial_route))
    }

    /// A store starting with `items`.
    #[must_use]
    pub fn with_items(name: &str, router: Router, items: Vec<ToDo>) -> Self {
        let store = Store::new(name, items);

        let add = store.handle(actions::add);
        let remove = store.handle(|todos, id: String| actions::remove(todos, &id));
        let toggle_all = store.handle(actions::toggle_all);
        let clear_completed = store.handle_unit(actions::clear_completed);

        let count = store.map(|todos| actions::count_active(todos));
        let all_checked = store.map(|todos| actions::all_completed(todos));
        let visible = Computed::from2(&store, &router, |todos: &Vec<ToDo>, route: &String| {
            visible_for_route(todos, route)
        });
        let each = Each::new(&store, &visible);

        Self {
            store,
            router,
            add,
            remove,
            toggle_all,
            clear_completed,
            count,
            all_checked,
            visible,
            each,
        }
    }

    /// The root store.
    #[must_use]
    pub fn store(&self) -> &Store<Vec<ToDo>> {
        &self.store
    }

    /// Push view of the full list.
    #[must_use]
    pub fn data(&self) -> ReadObservable<Vec<ToDo>> {
        self.store.data()
    }

    /// The full list right now.
    #[must_use]
    pub fn todos(&self) -> Vec<ToDo> {
        self.store.current()
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Appends a new item; blank text is ignored.
    #[must_use]
    pub fn add(&self) -> &Handler<String> {
        &self.add
    }

    /// Removes the item with the given id.
    #[must_use]
    pub fn remove(&self) -> &Handler<String> {
        &self.remove
    }

    /// Sets every item's `completed` flag.
    #[must_use]
    pub fn toggle_all(&self) -> &Handler<bool> {
        &self.toggle_all
    }

    /// Drops completed items.
    #[must_use]
    pub fn clear_completed(&self) -> &Handler<()> {
        &self.clear_completed
    }

    /// Number of items not yet completed.
    #[must_use]
    pub fn count(&self) -> &Computed<usize> {
        &self.count
    }

    /// True iff the list is non-empty and every item is completed.
    #[must_use]
    pub fn all_checked(&self) -> &Computed<bool> {
        &self.all_checked
    }

    /// The list as the active filter shows it.
    #[must_use]
    pub fn visible(&self) -> &Computed<Vec<ToDo>> {
        &self.visible
    }

    /// The filter selected by the current route.
    #[must_use]
    pub fn filter(&self) -> &'static Filter {
        Filter::for_route(&self.router.current())
    }

    /// Visible rows paired with their item stores.
    #[must_use]
    pub fn rows(&self) -> &Each<ToDo> {
        &self.each
    }

    /// Latest keyed snapshot of the visible rows.
    #[must_use]
    pub fn snapshot(&self) -> KeyedSnapshot<ToDo> {
        self.each.snapshot()
    }

    /// Field-store bundles for the visible rows, in order.
    #[must_use]
    pub fn items(&self) -> Vec<TodoItem> {
        self.each
            .snapshot()
            .iter()
            .map(|(_, store)| TodoItem::new(store.clone()))
            .collect()
    }

    /// Field-store bundle for the item with `id`, visible or not.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<TodoItem> {
        if let Some(store) = self.each.store(&id.to_string()) {
            return Some(TodoItem::new(store));
        }
        let todos = self.store.current();
        let todo = todos.iter().find(|t| t.id == id)?;
        Some(TodoItem::new(self.store.sub_item(todo)))
    }

    /// Footer text, e.g. `"2 items left"`.
    #[must_use]
    pub fn items_left_label(&self) -> String {
        actions::items_left_label(self.count.get())
    }

    /// Call `callback` with every new snapshot of the visible rows.
    pub fn watch_rows(&self, callback: impl Fn(&KeyedSnapshot<ToDo>) + 'static) -> Subscription {
        self.each.data().watch(callback)
    }
}
