#![forbid(unsafe_code)]

//! Shared, version-tracked values with change notification.
//!
//! An [`Observable<T>`] holds one current value behind `Rc<RefCell<..>>`.
//! Subscribers register a callback and receive every value published after
//! they attached. [`Observable::watch`] additionally replays the current
//! value immediately, which gives the "broadcast with latest-value replay"
//! behaviour stores need.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per publication.
//! 2. Subscribers are notified in registration order.
//! 3. Every subscriber observes publications in the order the value was
//!    replaced, including publications triggered from inside a callback
//!    (those are queued until the current round finishes).
//! 4. [`Observable::set`] with a value equal to the current one is a no-op.
//!    [`Observable::publish`] always notifies.
//! 5. Dropping a [`Subscription`] removes the callback before its next
//!    invocation; other subscribers are unaffected.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Callback panics | User code | Panic propagates, pending queue is cleared |
//! | `with` closure publishes | Re-entrant borrow | `RefCell` panic |

use std::any::Any;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
    pending: VecDeque<T>,
    notifying: bool,
}

/// A shared, mutable value that notifies subscribers when it changes.
///
/// Cloning an `Observable` yields another handle to the same value.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// `f` must not publish to this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of publications so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Replace the value if it differs from the current one.
    pub fn set(&self, value: T) {
        if self.inner.borrow().value == value {
            return;
        }
        self.publish(value);
    }

    /// Mutate a copy of the value in place, then [`set`](Self::set) it.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    /// Replace the value and notify every subscriber, even if unchanged.
    pub fn publish(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            inner.version += 1;
            inner.pending.push_back(value);
            if inner.notifying {
                // The outer delivery loop picks this up once the current round ends.
                return;
            }
            inner.notifying = true;
        }
        self.drain();
    }

    fn drain(&self) {
        let _guard = DrainGuard { inner: &self.inner };
        loop {
            let (value, subscribers) = {
                let mut inner = self.inner.borrow_mut();
                let Some(value) = inner.pending.pop_front() else {
                    return;
                };
                inner.subscribers.retain(|weak| weak.strong_count() > 0);
                (value, inner.subscribers.clone())
            };
            for weak in &subscribers {
                if let Some(callback) = weak.upgrade() {
                    callback(&value);
                }
            }
        }
    }

    /// Register `callback` for every later publication.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|weak| weak.strong_count() > 0);
        inner.subscribers.push(Rc::downgrade(&callback));
        drop(inner);
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Call `callback` with the current value now, then on every publication.
    ///
    /// Inside a delivery round with publications still queued, the queue
    /// supplies the latest value instead of an immediate replay.
    pub fn watch(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let replay = {
            let inner = self.inner.borrow();
            if inner.notifying && !inner.pending.is_empty() {
                None
            } else {
                Some(inner.value.clone())
            }
        };
        if let Some(current) = replay {
            callback(&current);
        }
        self.subscribe(callback)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// A handle that can read and subscribe but not publish.
    #[must_use]
    pub fn read_only(&self) -> ReadObservable<T> {
        ReadObservable {
            source: self.clone(),
        }
    }
}

struct DrainGuard<'a, T> {
    inner: &'a RefCell<Inner<T>>,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        // A panicking callback may still hold a borrow further up the stack.
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.notifying = false;
            if std::thread::panicking() {
                inner.pending.clear();
            }
        }
    }
}

/// Read-only view over an [`Observable`].
pub struct ReadObservable<T> {
    source: Observable<T>,
}

impl<T> Clone for ReadObservable<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadObservable").field(&self.source).finish()
    }
}

impl<T: Clone + PartialEq + 'static> ReadObservable<T> {
    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.source.get()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.source.with(f)
    }

    /// Number of publications so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.source.version()
    }

    /// See [`Observable::subscribe`].
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.source.subscribe(callback)
    }

    /// See [`Observable::watch`].
    pub fn watch(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.source.watch(callback)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.source.subscriber_count()
    }
}

/// Anything that exposes a readable, subscribable value.
pub trait Reactive<T: Clone + PartialEq + 'static> {
    /// Read-only handle to the underlying value stream.
    fn observe(&self) -> ReadObservable<T>;
}

impl<T: Clone + PartialEq + 'static> Reactive<T> for Observable<T> {
    fn observe(&self) -> ReadObservable<T> {
        self.read_only()
    }
}

impl<T: Clone + PartialEq + 'static> Reactive<T> for ReadObservable<T> {
    fn observe(&self) -> ReadObservable<T> {
        self.clone()
    }
}

/// RAII guard for a subscriber callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its callback"]
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl Subscription {
    /// Unsubscribe now. Equivalent to dropping the guard.
    pub fn detach(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
