#![forbid(unsafe_code)]

//! Read bindings and subscription scopes for the rendering layer.
//!
//! A [`Binding<T>`] is a lazily evaluated read of one or two reactive sources
//! plus a transform. A renderer reads bindings when it draws; it does not get
//! notified by them. Use [`Computed`](super::Computed) when the derived value
//! has to be pushed to subscribers.
//!
//! A [`BindingScope`] owns the subscriptions of one logical UI element (a list
//! row, a footer). Dropping the scope detaches everything it holds, which is
//! how a row stops listening once its item leaves the list.
//!
//! # Invariants
//!
//! 1. `Binding::get()` always returns the current (not stale) value.
//! 2. A binding's transform is applied on every `get()` call (no caching).
//! 3. Subscriptions held by a scope are released when the scope drops.
//! 4. Bindings are `Clone`; clones share the same source.

use std::rc::Rc;

use super::observable::{Reactive, Subscription};

/// A read-only binding to a reactive value with a transform.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: std::fmt::Debug + 'static> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Create a binding that evaluates `f` on each `get()` call.
    pub fn new(f: impl Fn() -> T + 'static) -> Self {
        Self { eval: Rc::new(f) }
    }

    /// Get the current bound value.
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }

    /// Apply a further transform, returning a new `Binding`.
    pub fn then<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Binding<U> {
        Binding {
            eval: Rc::new(move || f((self.eval)())),
        }
    }
}

/// Bind directly to a reactive value.
pub fn bind<T: Clone + PartialEq + 'static>(source: &impl Reactive<T>) -> Binding<T> {
    let src = source.observe();
    Binding {
        eval: Rc::new(move || src.get()),
    }
}

/// Bind to `source` transformed by `map`.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &impl Reactive<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let src = source.observe();
    Binding {
        eval: Rc::new(move || src.with(|v| map(v))),
    }
}

/// Bind to two reactive values combined by `map`.
pub fn bind_mapped2<S1, S2, T>(
    s1: &impl Reactive<S1>,
    s2: &impl Reactive<S2>,
    map: impl Fn(&S1, &S2) -> T + 'static,
) -> Binding<T>
where
    S1: Clone + PartialEq + 'static,
    S2: Clone + PartialEq + 'static,
    T: 'static,
{
    let src1 = s1.observe();
    let src2 = s2.observe();
    Binding {
        eval: Rc::new(move || src1.with(|v1| src2.with(|v2| map(v1, v2)))),
    }
}

/// Collects subscriptions for a logical scope (a list row, a section).
///
/// # Invariants
///
/// 1. After drop, no callbacks from this scope will fire.
/// 2. `clear()` releases all subscriptions immediately (reusable scope).
/// 3. `binding_count()` counts held subscriptions.
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    /// Create an empty binding scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
        }
    }

    /// Hold an existing subscription until the scope drops or is cleared.
    pub fn hold(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Subscribe to later publications of `source` within this scope.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &impl Reactive<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        let sub = source.observe().subscribe(callback);
        self.subscriptions.push(sub);
        self
    }

    /// Call `callback` with the current value, then on every publication.
    pub fn watch<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &impl Reactive<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        let sub = source.observe().watch(callback);
        self.subscriptions.push(sub);
        self
    }

    /// Number of subscriptions held by this scope.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the scope holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release all subscriptions now; the scope stays usable.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl Default for BindingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("binding_count", &self.subscriptions.len())
            .finish()
    }
}
