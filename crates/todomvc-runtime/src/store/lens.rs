#![forbid(unsafe_code)]

//! Lenses: paired getter and immutable setter for one part of a value.
//!
//! A lens focuses on a part `P` of a whole `W`. `get` reads the part, `set`
//! returns a new whole with only that part replaced. Lenses are pure and
//! never fail; they are usually built once per field, in a `const`.
//!
//! ```
//! use todomvc_runtime::field_lens;
//! use todomvc_runtime::store::lens::{Field, Lens};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! const X: Field<Point, i32> = field_lens!(Point, x: i32);
//!
//! let p = Point { x: 1, y: 2 };
//! assert_eq!(X.get(&p), 1);
//! assert_eq!(X.set(p, 5), Point { x: 5, y: 2 });
//! ```
//!
//! # Laws
//!
//! 1. `get(&set(w, p)) == p`
//! 2. `set(w.clone(), get(&w)) == w`
//! 3. `set(set(w, p), q) == set(w, q)`

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Bidirectional accessor for a part `P` of a whole `W`.
pub trait Lens<W, P> {
    /// Name of the focused part, used to name derived stores.
    fn id(&self) -> Cow<'static, str>;

    /// Read the part.
    fn get(&self, whole: &W) -> P;

    /// Return `whole` with the part replaced by `part`.
    fn set(&self, whole: W, part: P) -> W;

    /// Replace the part with `f` applied to it.
    fn modify(&self, whole: W, f: impl FnOnce(P) -> P) -> W
    where
        Self: Sized,
    {
        let part = self.get(&whole);
        self.set(whole, f(part))
    }

    /// Focus further into the part with `inner`.
    fn compose<Q, L>(self, inner: L) -> Compose<Self, L, P>
    where
        Self: Sized,
        L: Lens<P, Q>,
    {
        Compose {
            outer: self,
            inner,
            _part: PhantomData,
        }
    }
}

/// A lens over one struct field, built from plain function pointers.
pub struct Field<W, P> {
    id: &'static str,
    get: fn(&W) -> P,
    set: fn(W, P) -> W,
}

impl<W, P> Field<W, P> {
    /// Build a field lens. Usable in `const` items.
    #[must_use]
    pub const fn new(id: &'static str, get: fn(&W) -> P, set: fn(W, P) -> W) -> Self {
        Self { id, get, set }
    }
}

impl<W, P> Clone for Field<W, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, P> Copy for Field<W, P> {}

impl<W, P> fmt::Debug for Field<W, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.id).finish()
    }
}

impl<W, P> Lens<W, P> for Field<W, P> {
    fn id(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.id)
    }

    fn get(&self, whole: &W) -> P {
        (self.get)(whole)
    }

    fn set(&self, whole: W, part: P) -> W {
        (self.set)(whole, part)
    }
}

/// The lens that focuses on the whole value.
#[derive(Copy, Clone, Debug, Default)]
pub struct Identity;

impl<W: Clone> Lens<W, W> for Identity {
    fn id(&self) -> Cow<'static, str> {
        Cow::Borrowed("self")
    }

    fn get(&self, whole: &W) -> W {
        whole.clone()
    }

    fn set(&self, _whole: W, part: W) -> W {
        part
    }
}

/// Two lenses chained: `outer: W -> M`, then `inner: M -> P`.
pub struct Compose<A, B, M> {
    outer: A,
    inner: B,
    _part: PhantomData<fn() -> M>,
}

impl<A: Clone, B: Clone, M> Clone for Compose<A, B, M> {
    fn clone(&self) -> Self {
        Self {
            outer: self.outer.clone(),
            inner: self.inner.clone(),
            _part: PhantomData,
        }
    }
}

impl<A: fmt::Debug, B: fmt::Debug, M> fmt::Debug for Compose<A, B, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compose")
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<W, M, P, A, B> Lens<W, P> for Compose<A, B, M>
where
    A: Lens<W, M>,
    B: Lens<M, P>,
{
    fn id(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{}.{}", self.outer.id(), self.inner.id()))
    }

    fn get(&self, whole: &W) -> P {
        self.inner.get(&self.outer.get(whole))
    }

    fn set(&self, whole: W, part: P) -> W {
        let mid = self.outer.get(&whole);
        self.outer.set(whole, self.inner.set(mid, part))
    }
}

/// Build a [`Field`] lens for `$whole.$field`.
///
/// The part type must be `Clone`; the whole is moved through the setter.
#[macro_export]
macro_rules! field_lens {
    ($whole:ty, $field:ident : $part:ty) => {
        $crate::store::lens::Field::<$whole, $part>::new(
            stringify!($field),
            |whole: &$whole| -> $part { ::core::clone::Clone::clone(&whole.$field) },
            |mut whole: $whole, part: $part| -> $whole {
                whole.$field = part;
                whole
            },
        )
    };
}
