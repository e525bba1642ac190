#![forbid(unsafe_code)]

//! Stores: one reactive value, fed by handlers, projectable into sub-stores.
//!
//! A root [`Store<T>`] owns its value. Every change replaces the value
//! wholesale and republishes it through [`Store::data`]. A derived store
//! (from [`Store::sub`] or [`Store::sub_item`]) owns nothing: it reads a
//! projection of its parent and writes back into the parent, which then
//! republishes to every sibling.
//!
//! ```
//! use todomvc_runtime::store::Store;
//!
//! let counter = Store::new("counter", 0_i32);
//! let add = counter.handle(|n, by: i32| n + by);
//! add.call(5);
//! add.call(2);
//! assert_eq!(counter.current(), 7);
//! ```
//!
//! # Invariants
//!
//! 1. Handler invocations read, compute, replace and publish in one step;
//!    the root store publishes every handler result.
//! 2. A lens sub-store republishes only when its part changes.
//! 3. Two sub-stores over the same lens observe the same value.
//! 4. Writes through a sub-store never create an independent copy of state.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Item write-back misses | Item removed from the parent list | No-op, parent does not publish |
//! | Item read misses | Item being removed | Last-known value is kept |

pub mod keyed;
pub mod lens;

use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::reactive::{Computed, Observable, Reactive, ReadObservable, Subscription};

pub use keyed::{Each, Keyed, KeyedEntry, KeyedSnapshot};
pub use lens::{Compose, Field, Identity, Lens};

/// A callable registered on a store, taking one input per invocation.
pub struct Handler<I> {
    run: Rc<dyn Fn(I)>,
}

impl<I> Clone for Handler<I> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

impl<I> fmt::Debug for Handler<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

impl<I: 'static> Handler<I> {
    /// Wrap a plain callback as a handler.
    pub fn new(run: impl Fn(I) + 'static) -> Self {
        Self { run: Rc::new(run) }
    }

    /// Invoke the handler with `input`.
    pub fn call(&self, input: I) {
        (self.run)(input);
    }

    /// Adapt the input type, e.g. map a click to the id it removes.
    pub fn contramap<J: 'static>(&self, f: impl Fn(J) -> I + 'static) -> Handler<J> {
        let run = Rc::clone(&self.run);
        Handler {
            run: Rc::new(move |input| run(f(input))),
        }
    }
}

impl Handler<()> {
    /// Invoke a handler that takes no input.
    pub fn trigger(&self) {
        self.call(());
    }
}

enum Source<T> {
    Root(Observable<T>),
    Derived {
        value: Computed<T>,
        read: Rc<dyn Fn() -> Option<T>>,
        write: Rc<dyn Fn(T)>,
    },
}

/// A reactive holder of one current value.
///
/// Cloning a store yields another handle to the same state.
pub struct Store<T> {
    id: Rc<str>,
    source: Rc<Source<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            id: Rc::clone(&self.id),
            source: Rc::clone(&self.source),
        }
    }
}

impl<T> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &*self.source {
            Source::Root(_) => "root",
            Source::Derived { .. } => "derived",
        };
        f.debug_struct("Store")
            .field("id", &self.id)
            .field("kind", &kind)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Store<T> {
    /// Create a root store owning `initial`.
    #[must_use]
    pub fn new(id: impl Into<String>, initial: T) -> Self {
        Self {
            id: Rc::from(id.into()),
            source: Rc::new(Source::Root(Observable::new(initial))),
        }
    }

    fn derived(
        id: String,
        value: Computed<T>,
        read: impl Fn() -> Option<T> + 'static,
        write: impl Fn(T) + 'static,
    ) -> Self {
        Self {
            id: Rc::from(id),
            source: Rc::new(Source::Derived {
                value,
                read: Rc::new(read),
                write: Rc::new(write),
            }),
        }
    }

    /// Name of this store.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether this store owns its value.
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(&*self.source, Source::Root(_))
    }

    /// Whether two handles refer to the same store.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.source, &other.source)
    }

    /// Push view of the current value.
    #[must_use]
    pub fn data(&self) -> ReadObservable<T> {
        match &*self.source {
            Source::Root(obs) => obs.read_only(),
            Source::Derived { value, .. } => value.observe(),
        }
    }

    /// Snapshot of the current value.
    #[must_use]
    pub fn current(&self) -> T {
        match &*self.source {
            Source::Root(obs) => obs.get(),
            Source::Derived { value, read, .. } => read().unwrap_or_else(|| value.get()),
        }
    }

    /// Call `callback` with the current value now and after every change.
    pub fn watch(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.data().watch(callback)
    }

    /// Derive a read-only value, republished only when it changes.
    pub fn map<U: Clone + PartialEq + 'static>(
        &self,
        map: impl Fn(&T) -> U + 'static,
    ) -> Computed<U> {
        match &*self.source {
            Source::Root(obs) => Computed::new(obs, map),
            Source::Derived { value, .. } => value.map(map),
        }
    }

    fn commit(&self, next: T) {
        match &*self.source {
            Source::Root(obs) => {
                trace!(store = %self.id, version = obs.version() + 1, "publish");
                obs.publish(next);
            }
            Source::Derived { write, .. } => write(next),
        }
    }

    /// Replace the value through the same path handlers use.
    pub fn set(&self, value: T) {
        self.commit(value);
    }

    /// Register an update function; each call of the returned handler reads
    /// the current value, computes the next one and publishes it.
    pub fn handle<I: 'static>(&self, update: impl Fn(T, I) -> T + 'static) -> Handler<I> {
        let store = self.clone();
        Handler::new(move |input| {
            debug!(store = %store.id, "handler invoked");
            let next = update(store.current(), input);
            store.commit(next);
        })
    }

    /// Register an update function that takes no input.
    pub fn handle_unit(&self, update: impl Fn(T) -> T + 'static) -> Handler<()> {
        self.handle(move |current, ()| update(current))
    }

    /// Handler that replaces the value with its input.
    #[must_use]
    pub fn update(&self) -> Handler<T> {
        self.handle(|_, next| next)
    }

    fn modify(&self, f: impl FnOnce(T) -> Option<T>) {
        if let Some(next) = f(self.current()) {
            self.commit(next);
        }
    }

    /// Derive a store focused on the part of this value that `lens` selects.
    ///
    /// Writes to the derived store go through `lens.set` into this store.
    pub fn sub<P, L>(&self, lens: L) -> Store<P>
    where
        P: Clone + PartialEq + 'static,
        L: Lens<T, P> + 'static,
    {
        let id = format!("{}.{}", self.id, lens.id());
        let lens = Rc::new(lens);

        let getter = Rc::clone(&lens);
        let value = Computed::new(&self.data(), move |whole| getter.get(whole));

        let (parent, getter) = (self.clone(), Rc::clone(&lens));
        let read = move || Some(getter.get(&parent.current()));

        let parent = self.clone();
        let write = move |part: P| parent.modify(|whole| Some(lens.set(whole, part)));

        Store::derived(id, value, read, write)
    }
}

impl<T: Clone + PartialEq + 'static> Reactive<T> for Store<T> {
    fn observe(&self) -> ReadObservable<T> {
        self.data()
    }
}
