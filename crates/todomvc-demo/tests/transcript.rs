#![forbid(unsafe_code)]

//! Drives a session line by line and checks the rendered screens.
//!
//! Run: `cargo test -p todomvc-demo --test transcript`

use pretty_assertions::assert_eq;
use todomvc_app::{Router, TodoStore};
use todomvc_demo::{Command, Outcome, Screen, Session, render};

/// Feed `lines` and collect every screen that would have been printed.
fn play(lines: &[&str]) -> Vec<String> {
    let session = Session::new(TodoStore::new("todos", Router::default()));
    let screen = Screen::attach(session.store());
    let mut screens = Vec::new();
    if screen.take_dirty() {
        screens.push(render(session.store()));
    }
    for line in lines {
        let Ok(Some(command)) = Command::parse(line) else {
            continue;
        };
        if let Ok(Outcome::Quit) = session.execute(command) {
            break;
        }
        if screen.take_dirty() {
            screens.push(render(session.store()));
        }
    }
    screens
}

#[test]
fn buy_milk_walk_dog_session() {
    let screens = play(&[
        "add Buy milk",
        "add Walk dog",
        "toggle 1",
        "route /active",
        "route /completed",
        "clear",
        "route /",
        "quit",
        "add never seen",
    ]);

    assert_eq!(screens.len(), 8);
    assert_eq!(
        screens[4],
        "todos\n   [ ] mark all as complete\n 1. [ ] Walk dog\n1 item left  All [Active] Completed  (clear completed)\n"
    );
    assert_eq!(
        screens[5],
        "todos\n   [ ] mark all as complete\n 1. [x] Buy milk\n1 item left  All Active [Completed]  (clear completed)\n"
    );
    assert_eq!(
        screens[7],
        "todos\n   [ ] mark all as complete\n 1. [ ] Walk dog\n1 item left  [All] Active Completed\n"
    );
}

#[test]
fn rejected_lines_do_not_redraw() {
    let screens = play(&["toggle", "remove 7", "bogus", "add   "]);
    // `add` with blank text still republishes the unchanged list.
    assert_eq!(screens.len(), 2);
    assert_eq!(screens[0], screens[1]);
}
