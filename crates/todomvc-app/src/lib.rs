#![forbid(unsafe_code)]

//! To-do list application model on top of `todomvc-runtime`.
//!
//! # Role in the workspace
//! - **Model**: [`ToDo`] records and their field lenses.
//! - **Views**: route-keyed [`Filter`]s and the [`Router`] that selects one.
//! - **State**: [`TodoStore`], the single root store with its handlers,
//!   derived counters and the keyed visible rows.
//! - **Config**: [`TodoConfig`], loaded from defaults, JSON and env.
//!
//! Front ends construct one [`TodoStore`] and pass it by reference; there is
//! no global instance.

pub mod actions;
pub mod config;
pub mod filter;
pub mod item;
pub mod lenses;
pub mod model;
pub mod router;
pub mod todo_store;

pub use config::{ConfigError, TodoConfig};
pub use filter::{FILTERS, Filter};
pub use item::TodoItem;
pub use model::ToDo;
pub use router::Router;
pub use todo_store::TodoStore;
