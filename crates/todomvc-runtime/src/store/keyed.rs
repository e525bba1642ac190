#![forbid(unsafe_code)]

//! Identity-keyed sub-stores and list reconciliation.
//!
//! [`Store::sub_item`] scopes a store to the element of a list whose key
//! matches a given item. [`Each`] follows a published list (usually the
//! filtered, visible one) and pairs every element with its item store,
//! reusing stores by key between publications so unchanged rows are not
//! rebuilt.
//!
//! # Invariants
//!
//! 1. A snapshot lists entries in the order of the published list.
//! 2. A key that survives from one snapshot to the next keeps the same store.
//! 3. Stores for keys that disappear are dropped with the snapshot that
//!    removed them.
//! 4. Reconciliation is O(n) in the list length (hash index by key).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Duplicate key in list | Broken caller invariant | Both rows share one store |
//! | Write with a different key | Caller replaced the item identity | Write ignored |

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use tracing::{debug, warn};

use super::Store;
use crate::reactive::{Computed, Observable, Reactive, ReadObservable, Subscription};

/// An item with a stable identity inside a list.
pub trait Keyed {
    /// Identity type. Displayed to name item stores.
    type Key: Clone + Eq + Hash + fmt::Display + 'static;

    /// The identity of this item. Must not change over the item's lifetime.
    fn key(&self) -> &Self::Key;
}

fn find<'a, T: Keyed>(list: &'a [T], key: &T::Key) -> Option<&'a T> {
    list.iter().find(|item| item.key() == key)
}

impl<T: Keyed + Clone + PartialEq + 'static> Store<Vec<T>> {
    /// Derive a store scoped to the element with the same key as `item`.
    ///
    /// Reads keep the last-known element while the key is absent. Writes
    /// replace the matching element in place; if it is gone, nothing happens.
    pub fn sub_item(&self, item: &T) -> Store<T> {
        let key = item.key().clone();
        let id = key.to_string();

        let k = key.clone();
        let value = Computed::filter_map(&self.data(), item.clone(), move |list: &Vec<T>| {
            find(list, &k).cloned()
        });

        let (parent, k) = (self.clone(), key.clone());
        let read = move || parent.data().with(|list| find(list, &k).cloned());

        let parent = self.clone();
        let write = move |next: T| {
            if next.key() != &key {
                warn!(store = %parent.id, key = %key, new_key = %next.key(), "item key change ignored");
                return;
            }
            parent.modify(|mut list| {
                let Some(slot) = list.iter_mut().find(|entry| entry.key() == &key) else {
                    debug!(store = %parent.id, key = %key, "write-back to missing item ignored");
                    return None;
                };
                *slot = next;
                Some(list)
            });
        };

        Store::derived(id, value, read, write)
    }
}

/// One row of a [`KeyedSnapshot`]: the item and its store.
#[derive(Clone, Debug)]
pub struct KeyedEntry<T> {
    /// The item as it appeared in the published list.
    pub item: T,
    /// Store scoped to the item's key.
    pub store: Store<T>,
}

impl<T: PartialEq> PartialEq for KeyedEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item && Rc::ptr_eq(&self.store.source, &other.store.source)
    }
}

/// The reconciled state of a list after one publication.
pub struct KeyedSnapshot<T: Keyed> {
    entries: Rc<[KeyedEntry<T>]>,
    inserted: Rc<[T::Key]>,
    removed: Rc<[T::Key]>,
}

impl<T: Keyed> Clone for KeyedSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
            inserted: Rc::clone(&self.inserted),
            removed: Rc::clone(&self.removed),
        }
    }
}

impl<T: Keyed + PartialEq> PartialEq for KeyedSnapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
            && self.inserted == other.inserted
            && self.removed == other.removed
    }
}

impl<T: Keyed + fmt::Debug> fmt::Debug for KeyedSnapshot<T>
where
    T::Key: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedSnapshot")
            .field("entries", &self.entries.len())
            .field("inserted", &self.inserted)
            .field("removed", &self.removed)
            .finish()
    }
}

impl<T: Keyed> KeyedSnapshot<T> {
    fn empty() -> Self {
        Self {
            entries: Rc::from(Vec::new()),
            inserted: Rc::from(Vec::new()),
            removed: Rc::from(Vec::new()),
        }
    }

    /// Items paired with their stores, in list order.
    ///
    /// Each call starts a fresh pass over the snapshot.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &Store<T>)> + '_ {
        self.entries.iter().map(|entry| (&entry.item, &entry.store))
    }

    /// The entries as a slice.
    #[must_use]
    pub fn entries(&self) -> &[KeyedEntry<T>] {
        &self.entries
    }

    /// Keys that were not in the previous snapshot, in list order.
    #[must_use]
    pub fn inserted(&self) -> &[T::Key] {
        &self.inserted
    }

    /// Keys of the previous snapshot that are gone, in their previous order.
    #[must_use]
    pub fn removed(&self) -> &[T::Key] {
        &self.removed
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store for `key`, if it is in this snapshot.
    #[must_use]
    pub fn store(&self, key: &T::Key) -> Option<&Store<T>> {
        self.entries
            .iter()
            .find(|entry| entry.item.key() == key)
            .map(|entry| &entry.store)
    }
}

impl<'a, T: Keyed> IntoIterator for &'a KeyedSnapshot<T> {
    type Item = &'a KeyedEntry<T>;
    type IntoIter = std::slice::Iter<'a, KeyedEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

struct Reconciler<T: Keyed> {
    parent: Store<Vec<T>>,
    order: Vec<T::Key>,
    stores: HashMap<T::Key, Store<T>>,
}

impl<T: Keyed + Clone + PartialEq + 'static> Reconciler<T> {
    fn reconcile(&mut self, list: &[T]) -> KeyedSnapshot<T> {
        let mut next: HashMap<T::Key, Store<T>> = HashMap::with_capacity(list.len());
        let mut order = Vec::with_capacity(list.len());
        let mut entries = Vec::with_capacity(list.len());
        let mut inserted = Vec::new();

        for item in list {
            let key = item.key();
            let store = if let Some(store) = next.get(key) {
                store.clone()
            } else if let Some(store) = self.stores.remove(key) {
                store
            } else {
                inserted.push(key.clone());
                self.parent.sub_item(item)
            };
            if !next.contains_key(key) {
                next.insert(key.clone(), store.clone());
                order.push(key.clone());
            }
            entries.push(KeyedEntry {
                item: item.clone(),
                store,
            });
        }

        let removed: Vec<T::Key> = self
            .order
            .iter()
            .filter(|key| self.stores.contains_key(*key))
            .cloned()
            .collect();

        debug!(
            store = %self.parent.id,
            rows = entries.len(),
            inserted = inserted.len(),
            removed = removed.len(),
            "reconciled list"
        );

        self.stores = next;
        self.order = order;
        KeyedSnapshot {
            entries: Rc::from(entries),
            inserted: Rc::from(inserted),
            removed: Rc::from(removed),
        }
    }
}

/// Follows a published list and keeps one item store per key.
///
/// Item stores are derived from `parent` (the list that owns the items), so
/// `source` may be any projection of it, such as a filtered view.
pub struct Each<T: Keyed> {
    snapshot: Observable<KeyedSnapshot<T>>,
    _subscription: Rc<Subscription>,
}

impl<T: Keyed> Clone for Each<T> {
    fn clone(&self) -> Self {
        Self {
            snapshot: self.snapshot.clone(),
            _subscription: Rc::clone(&self._subscription),
        }
    }
}

impl<T: Keyed + Clone + PartialEq + 'static> Each<T> {
    /// Start following `source`, creating item stores from `parent`.
    pub fn new(parent: &Store<Vec<T>>, source: &impl Reactive<Vec<T>>) -> Self {
        let source = source.observe();
        let mut reconciler = Reconciler {
            parent: parent.clone(),
            order: Vec::new(),
            stores: HashMap::new(),
        };
        // Item stores subscribe to `parent`, which may be `source` itself, so
        // reconcile from a copy rather than inside a borrow of the source.
        let first = reconciler.reconcile(&source.get());
        let snapshot = Observable::new(first);

        let reconciler = std::cell::RefCell::new(reconciler);
        let target = snapshot.clone();
        let subscription = source.subscribe(move |list| {
            let next = reconciler.borrow_mut().reconcile(list);
            target.publish(next);
        });

        Self {
            snapshot,
            _subscription: Rc::new(subscription),
        }
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> KeyedSnapshot<T> {
        self.snapshot.get()
    }

    /// Push view of snapshots, one per publication of the source.
    #[must_use]
    pub fn data(&self) -> ReadObservable<KeyedSnapshot<T>> {
        self.snapshot.read_only()
    }

    /// Store for `key` in the latest snapshot.
    #[must_use]
    pub fn store(&self, key: &T::Key) -> Option<Store<T>> {
        self.snapshot.with(|snap| snap.store(key).cloned())
    }
}

impl<T: Keyed + Clone + PartialEq + 'static> Reactive<KeyedSnapshot<T>> for Each<T> {
    fn observe(&self) -> ReadObservable<KeyedSnapshot<T>> {
        self.data()
    }
}

impl<T: Keyed> fmt::Debug for Each<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Each").finish_non_exhaustive()
    }
}

impl<T: Keyed> Default for KeyedSnapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}
