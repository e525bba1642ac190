#![forbid(unsafe_code)]

//! Route-keyed filters over the to-do list.
//!
//! A filter is a pure predicate selected by route. Unknown routes fall back
//! to [`ALL`], so a mistyped fragment shows the whole list rather than
//! nothing.

use std::fmt;

use crate::model::ToDo;

/// A named, route-selected view of the list.
pub struct Filter {
    /// Route that selects this filter, e.g. `"/active"`.
    pub route: &'static str,
    /// Link text shown in the footer.
    pub label: &'static str,
    keep: fn(&ToDo) -> bool,
}

impl Filter {
    /// Items that pass this filter, in list order.
    #[must_use]
    pub fn apply(&self, todos: &[ToDo]) -> Vec<ToDo> {
        todos.iter().filter(|t| self.matches(t)).cloned().collect()
    }

    /// Whether `todo` passes this filter.
    #[must_use]
    pub fn matches(&self, todo: &ToDo) -> bool {
        (self.keep)(todo)
    }

    /// The filter for `route`, or [`ALL`] when no filter has that route.
    #[must_use]
    pub fn for_route(route: &str) -> &'static Filter {
        FILTERS
            .iter()
            .find(|f| f.route == route)
            .unwrap_or(&FILTERS[0])
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("route", &self.route)
            .field("label", &self.label)
            .finish()
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.route == other.route
    }
}

/// Every filter, in footer order. The first one is the fallback.
pub static FILTERS: [Filter; 3] = [
    Filter {
        route: "/",
        label: "All",
        keep: |_| true,
    },
    Filter {
        route: "/active",
        label: "Active",
        keep: |t| !t.completed,
    },
    Filter {
        route: "/completed",
        label: "Completed",
        keep: |t| t.completed,
    },
];

/// Shows every item.
pub static ALL: &Filter = &FILTERS[0];
/// Shows items that are not completed.
pub static ACTIVE: &Filter = &FILTERS[1];
/// Shows completed items.
pub static COMPLETED: &Filter = &FILTERS[2];

/// Apply the filter selected by `route`.
#[must_use]
pub fn visible_for_route(todos: &[ToDo], route: &str) -> Vec<ToDo> {
    Filter::for_route(route).apply(todos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> Vec<ToDo> {
        let mut done = ToDo::with_id("1", "done");
        done.completed = true;
        vec![done, ToDo::with_id("2", "open"), ToDo::with_id("3", "also open")]
    }

    fn ids(todos: &[ToDo]) -> Vec<&str> {
        todos.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn all_keeps_everything() {
        assert_eq!(ids(&ALL.apply(&list())), vec!["1", "2", "3"]);
    }

    #[test]
    fn active_and_completed_partition() {
        let todos = list();
        assert_eq!(ids(&ACTIVE.apply(&todos)), vec!["2", "3"]);
        assert_eq!(ids(&COMPLETED.apply(&todos)), vec!["1"]);
    }

    #[test]
    fn route_lookup() {
        assert_eq!(Filter::for_route("/active"), ACTIVE);
        assert_eq!(Filter::for_route("/completed"), COMPLETED);
        assert_eq!(Filter::for_route("/"), ALL);
    }

    #[test]
    fn unknown_route_shows_all() {
        assert_eq!(Filter::for_route("/nope"), ALL);
        assert_eq!(ids(&visible_for_route(&list(), "")), vec!["1", "2", "3"]);
    }

    #[test]
    fn footer_order() {
        let labels: Vec<_> = FILTERS.iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["All", "Active", "Completed"]);
    }

    #[test]
    fn matches_agrees_with_apply() {
        let todos = list();
        for filter in &FILTERS {
            let kept: Vec<ToDo> = todos.iter().filter(|t| filter.matches(t)).cloned().collect();
            assert_eq!(kept, filter.apply(&todos), "filter {}", filter.route);
        }
    }
}
