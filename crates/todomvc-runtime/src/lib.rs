#![forbid(unsafe_code)]

//! Single-threaded reactive runtime for the to-do application.
//!
//! The crate has two layers:
//!
//! - [`reactive`]: observables, derived values, bindings and subscription
//!   lifetimes.
//! - [`store`]: stores fed by handlers, lenses, sub-stores derived by lens or
//!   by list-item identity, and keyed list reconciliation.
//!
//! Everything here is `!Send`: all mutations and publications run on one
//! thread, each handler to completion before the next.

pub mod reactive;
pub mod store;

pub use reactive::{
    Binding, BindingScope, Computed, Observable, Reactive, ReadObservable, Subscription,
};
pub use store::{Each, Field, Handler, Keyed, KeyedEntry, KeyedSnapshot, Lens, Store};
