#![forbid(unsafe_code)]

//! Derived values that republish only when their result changes.
//!
//! A [`Computed<T>`] subscribes to one or two sources and recomputes eagerly
//! on every source publication. The result is stored with
//! [`Observable::set`], so subscribers of the computed value are notified
//! only when the derived value actually differs (distinct-until-changed).
//!
//! The computed value stays connected as long as the `Computed` (or a clone
//! of it) is alive. A [`ReadObservable`] obtained from it keeps the last value
//! readable but stops updating once every `Computed` handle is dropped.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use super::observable::{Observable, Reactive, ReadObservable, Subscription};

struct Sources {
    subscriptions: Vec<Subscription>,
    _upstream: Option<Box<dyn Any>>,
}

/// An eagerly recomputed, memoized value derived from reactive sources.
pub struct Computed<T> {
    value: Observable<T>,
    sources: Rc<Sources>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            sources: Rc::clone(&self.sources),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed")
            .field("value", &self.value)
            .field("sources", &self.sources.subscriptions.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Computed<T> {
    fn connected(value: Observable<T>, subscriptions: Vec<Subscription>) -> Self {
        Self {
            value,
            sources: Rc::new(Sources {
                subscriptions,
                _upstream: None,
            }),
        }
    }

    /// Derive a value from a single source.
    pub fn new<S: Clone + PartialEq + 'static>(
        source: &impl Reactive<S>,
        map: impl Fn(&S) -> T + 'static,
    ) -> Self {
        let source = source.observe();
        let value = Observable::new(source.with(&map));
        let target = value.clone();
        let sub = source.subscribe(move |s| target.set(map(s)));
        Self::connected(value, vec![sub])
    }

    /// Derive a value that keeps its last result whenever `map` yields `None`.
    pub fn filter_map<S: Clone + PartialEq + 'static>(
        source: &impl Reactive<S>,
        initial: T,
        map: impl Fn(&S) -> Option<T> + 'static,
    ) -> Self {
        let source = source.observe();
        let value = Observable::new(source.with(&map).unwrap_or(initial));
        let target = value.clone();
        let sub = source.subscribe(move |s| {
            if let Some(next) = map(s) {
                target.set(next);
            }
        });
        Self::connected(value, vec![sub])
    }

    /// Derive a value from two sources; recomputed when either publishes.
    pub fn from2<A, B>(
        a: &impl Reactive<A>,
        b: &impl Reactive<B>,
        map: impl Fn(&A, &B) -> T + 'static,
    ) -> Self
    where
        A: Clone + PartialEq + 'static,
        B: Clone + PartialEq + 'static,
    {
        let a = a.observe();
        let b = b.observe();
        let map = Rc::new(map);
        let value = Observable::new(a.with(|va| b.with(|vb| map(va, vb))));

        let (target, other, f) = (value.clone(), b.clone(), Rc::clone(&map));
        let sub_a = a.subscribe(move |va| target.set(other.with(|vb| f(va, vb))));
        let (target, other, f) = (value.clone(), a.clone(), map);
        let sub_b = b.subscribe(move |vb| target.set(other.with(|va| f(va, vb))));

        Self::connected(value, vec![sub_a, sub_b])
    }

    /// Chain a further derivation. The result keeps `self` connected.
    pub fn map<U: Clone + PartialEq + 'static>(
        &self,
        map: impl Fn(&T) -> U + 'static,
    ) -> Computed<U> {
        let value = Observable::new(self.value.with(&map));
        let target = value.clone();
        let sub = self.value.subscribe(move |t| target.set(map(t)));
        Computed {
            value,
            sources: Rc::new(Sources {
                subscriptions: vec![sub],
                _upstream: Some(Box::new(self.clone())),
            }),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }

    /// Number of times the derived value changed.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.value.version()
    }

    /// See [`Observable::subscribe`].
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.value.subscribe(callback)
    }

    /// See [`Observable::watch`].
    pub fn watch(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.value.watch(callback)
    }
}

impl<T: Clone + PartialEq + 'static> Reactive<T> for Computed<T> {
    fn observe(&self) -> ReadObservable<T> {
        self.value.read_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn tracks_source() {
        let source = Observable::new(vec![1, 2, 3]);
        let len = Computed::new(&source, Vec::len);
        assert_eq!(len.get(), 3);

        source.update(|v| v.push(4));
        assert_eq!(len.get(), 4);
    }

    #[test]
    fn republishes_only_on_change() {
        let source = Observable::new(vec![false, true]);
        let any_done = Computed::new(&source, |v| v.iter().any(|d| *d));
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let _sub = any_done.subscribe(move |_| f.set(f.get() + 1));

        source.set(vec![true, true]);
        source.set(vec![true, false, true]);
        assert_eq!(fired.get(), 0, "result stayed true");

        source.set(vec![false]);
        assert_eq!(fired.get(), 1);
        assert!(!any_done.get());
    }

    #[test]
    fn filter_map_keeps_last_value() {
        let source = Observable::new(Some(1));
        let value = Computed::filter_map(&source, 0, |v: &Option<i32>| *v);
        assert_eq!(value.get(), 1);

        source.set(None);
        assert_eq!(value.get(), 1);

        source.set(Some(5));
        assert_eq!(value.get(), 5);
    }

    #[test]
    fn filter_map_uses_initial_when_absent() {
        let source = Observable::new(None::<i32>);
        let value = Computed::filter_map(&source, 42, |v: &Option<i32>| *v);
        assert_eq!(value.get(), 42);
    }

    #[test]
    fn from2_recomputes_on_either_source() {
        let items = Observable::new(vec![1, 2, 3, 4]);
        let even_only = Observable::new(false);
        let visible = Computed::from2(&items, &even_only, |items, even| {
            items
                .iter()
                .copied()
                .filter(|i| !*even || i % 2 == 0)
                .collect::<Vec<_>>()
        });
        assert_eq!(visible.get(), vec![1, 2, 3, 4]);

        even_only.set(true);
        assert_eq!(visible.get(), vec![2, 4]);

        items.set(vec![6, 7]);
        assert_eq!(visible.get(), vec![6]);
    }

    #[test]
    fn map_chain_stays_connected() {
        let source = Observable::new(2);
        let label = Computed::new(&source, |v| v * 10).map(|v| format!("{v}"));
        source.set(3);
        assert_eq!(label.get(), "30");
    }

    #[test]
    fn dropping_computed_detaches_from_source() {
        let source = Observable::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let doubled = Computed::new(&source, |v| v * 2);
            let s = Rc::clone(&seen);
            let _sub = doubled.subscribe(move |v| s.borrow_mut().push(*v));
            source.set(2);
            assert_eq!(source.subscriber_count(), 1);
        }
        source.set(3);
        assert_eq!(*seen.borrow(), vec![4]);
        assert_eq!(source.subscriber_count(), 0);
    }
}
