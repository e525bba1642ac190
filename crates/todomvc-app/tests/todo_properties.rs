#![forbid(unsafe_code)]

//! Property tests for the list handlers and derived values.
//!
//! Run: `cargo test -p todomvc-app --test todo_properties`

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use todomvc_app::actions::{add, all_completed, clear_completed, count_active, toggle_all};
use todomvc_app::lenses::TEXT;
use todomvc_app::{Router, ToDo, TodoStore};
use todomvc_runtime::Lens;

fn todo() -> impl Strategy<Value = ToDo> {
    ("[a-z]{1,6}", "[a-z ]{0,12}", any::<bool>(), any::<bool>()).prop_map(
        |(id, text, completed, editing)| ToDo {
            completed,
            editing,
            ..ToDo::with_id(id, text)
        },
    )
}

fn todos() -> impl Strategy<Value = Vec<ToDo>> {
    prop::collection::vec(todo(), 0..12).prop_map(|list| {
        let mut seen = HashSet::new();
        list.into_iter().filter(|t| seen.insert(t.id.clone())).collect()
    })
}

fn ids(list: &[ToDo]) -> Vec<String> {
    list.iter().map(|t| t.id.clone()).collect()
}

proptest! {
    #[test]
    fn toggle_all_sets_every_flag(list in todos(), flag in any::<bool>()) {
        let next = toggle_all(list.clone(), flag);
        prop_assert_eq!(ids(&next), ids(&list));
        for (before, after) in list.iter().zip(&next) {
            prop_assert_eq!(after.completed, flag);
            prop_assert_eq!(&after.text, &before.text);
            prop_assert_eq!(after.editing, before.editing);
        }
    }

    #[test]
    fn clear_completed_filters_and_is_idempotent(list in todos()) {
        let once = clear_completed(list.clone());
        let expected: Vec<ToDo> = list.iter().filter(|t| !t.completed).cloned().collect();
        prop_assert_eq!(&once, &expected);
        prop_assert_eq!(clear_completed(once.clone()), once);
    }

    #[test]
    fn add_appends_fresh_item(list in todos(), text in "[a-z][a-z ]{0,10}") {
        let next = add(list.clone(), text.clone());
        prop_assert_eq!(next.len(), list.len() + 1);
        prop_assert_eq!(&next[..list.len()], &list[..]);

        let added = &next[list.len()];
        prop_assert_eq!(&added.text, &text);
        prop_assert!(!added.completed);
        prop_assert!(!added.editing);
        prop_assert!(!list.iter().any(|t| t.id == added.id));
    }

    #[test]
    fn add_empty_is_noop(list in todos()) {
        prop_assert_eq!(add(list.clone(), String::new()), list);
    }

    #[test]
    fn write_back_to_unknown_id_is_noop(list in todos(), stray in todo(), text in "[a-z]{0,8}") {
        prop_assume!(!list.iter().any(|t| t.id == stray.id));
        let store = TodoStore::with_items("todos", Router::default(), list.clone());
        let item = store.store().sub_item(&stray);
        item.set(ToDo { completed: !stray.completed, ..stray.clone() });
        item.sub(TEXT).set(text);
        prop_assert_eq!(store.todos(), list);
    }

    #[test]
    fn text_lens_round_trip(whole in todo(), text in "[a-z ]{0,12}") {
        prop_assert_eq!(TEXT.get(&TEXT.set(whole.clone(), text.clone())), text);
        prop_assert_eq!(TEXT.set(whole.clone(), TEXT.get(&whole)), whole);
    }

    #[test]
    fn derived_values_match_list(list in todos()) {
        let store = TodoStore::with_items("todos", Router::default(), list.clone());
        let active = list.iter().filter(|t| !t.completed).count();
        prop_assert_eq!(store.count().get(), active);
        prop_assert_eq!(count_active(&list), active);

        let expected = !list.is_empty() && list.iter().all(|t| t.completed);
        prop_assert_eq!(store.all_checked().get(), expected);
        prop_assert_eq!(all_completed(&list), expected);
    }

    #[test]
    fn visible_rows_keep_list_order(list in todos(), route in prop::sample::select(vec!["/", "/active", "/completed", "/other"])) {
        let store = TodoStore::with_items("todos", Router::new(route), list.clone());
        let keep = |t: &ToDo| match route {
            "/active" => !t.completed,
            "/completed" => t.completed,
            _ => true,
        };
        let expected: Vec<String> = list.iter().filter(|&t| keep(t)).map(|t| t.id.clone()).collect();
        let rows: Vec<String> = store.snapshot().iter().map(|(t, _)| t.id.clone()).collect();
        prop_assert_eq!(rows, expected);
    }
}

#[test]
fn derived_values_on_empty_list() {
    let store = TodoStore::new("todos", Router::default());
    assert_eq!(store.count().get(), 0);
    assert!(!store.all_checked().get());
    assert_eq!(store.items_left_label(), "0 items left");
}
