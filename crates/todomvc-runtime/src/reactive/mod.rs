#![forbid(unsafe_code)]

//! Reactive values for the to-do runtime.
//!
//! - [`Observable`]: a shared, version-tracked value with subscriber
//!   callbacks and replay-on-watch.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`Computed`]: an eagerly recomputed value derived from one or two
//!   sources, republished only when it changes.
//! - [`Binding`] / [`BindingScope`]: lazy reads and subscription lifetimes
//!   for the rendering layer.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` callbacks; dead ones are
//! pruned when a new subscriber registers and during notification.
//! Publications made while a notification round is in flight are queued, so
//! every subscriber sees values in replacement order.

pub mod binding;
pub mod computed;
pub mod observable;

pub use binding::{Binding, BindingScope, bind, bind_mapped, bind_mapped2};
pub use computed::Computed;
pub use observable::{Observable, Reactive, ReadObservable, Subscription};
