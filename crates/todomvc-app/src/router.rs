#![forbid(unsafe_code)]

//! Route collaborator: publishes the current route string.
//!
//! The router accepts either a bare route (`"/active"`) or a URL fragment
//! (`"#/active"`) and publishes the normalized route. It knows nothing about
//! filters; [`crate::filter::Filter::for_route`] maps routes to filters.

use todomvc_runtime::{Observable, Reactive, ReadObservable, Subscription};
use tracing::debug;

/// Route used when none is given.
pub const DEFAULT_ROUTE: &str = "/";

/// Normalize a route or URL fragment.
///
/// Surrounding whitespace and a leading `#` are dropped, a missing leading
/// `/` is added, and an empty input becomes [`DEFAULT_ROUTE`].
#[must_use]
pub fn normalize_route(raw: &str) -> String {
    let trimmed = raw.trim();
    let route = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    if route.is_empty() {
        return DEFAULT_ROUTE.to_string();
    }
    if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{route}")
    }
}

/// Holds the current route and notifies subscribers when it changes.
#[derive(Clone, Debug)]
pub struct Router {
    route: Observable<String>,
}

impl Router {
    /// Create a router positioned at `initial` (normalized).
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            route: Observable::new(normalize_route(initial)),
        }
    }

    /// Switch to `target`. Navigating to the current route publishes nothing.
    pub fn navigate(&self, target: &str) {
        let route = normalize_route(target);
        debug!(route = %route, "navigate");
        self.route.set(route);
    }

    /// The current route.
    #[must_use]
    pub fn current(&self) -> String {
        self.route.get()
    }

    /// Whether `route` is the current one.
    #[must_use]
    pub fn is_current(&self, route: &str) -> bool {
        self.route.with(|current| current == route)
    }

    /// Push view of routes.
    #[must_use]
    pub fn routes(&self) -> ReadObservable<String> {
        self.route.read_only()
    }

    /// Call `callback` with the current route, then on every change.
    pub fn watch(&self, callback: impl Fn(&String) + 'static) -> Subscription {
        self.route.watch(callback)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE)
    }
}

impl Reactive<String> for Router {
    fn observe(&self) -> ReadObservable<String> {
        self.routes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn normalizes_fragments() {
        assert_eq!(normalize_route("#/active"), "/active");
        assert_eq!(normalize_route("/completed"), "/completed");
        assert_eq!(normalize_route("active"), "/active");
        assert_eq!(normalize_route(" # "), "/");
        assert_eq!(normalize_route(""), "/");
        assert_eq!(normalize_route("#"), "/");
    }

    #[test]
    fn navigate_publishes_changes_only() {
        let router = Router::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = router.watch(move |r| s.borrow_mut().push(r.clone()));

        router.navigate("#/active");
        router.navigate("/active");
        router.navigate("#/");
        assert_eq!(*seen.borrow(), vec!["/", "/active", "/"]);
    }

    #[test]
    fn is_current_compares_normalized_route() {
        let router = Router::new("#/completed");
        assert!(router.is_current("/completed"));
        assert!(!router.is_current("/"));
    }
}
