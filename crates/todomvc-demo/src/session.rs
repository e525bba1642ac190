#![forbid(unsafe_code)]

//! Applies parsed commands to a [`TodoStore`].

use todomvc_app::{TodoItem, TodoStore};
use tracing::debug;

use crate::command::{Command, CommandError, HELP};

/// What the front end should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading; print the message, if any.
    Continue(Option<String>),
    /// Stop reading input.
    Quit,
}

/// One interactive session over a store.
#[derive(Debug)]
pub struct Session {
    store: TodoStore,
}

impl Session {
    #[must_use]
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Run one command against the store.
    pub fn execute(&self, command: Command) -> Result<Outcome, CommandError> {
        debug!(?command, "execute");
        match command {
            Command::Add(text) => self.store.add().call(text),
            Command::Toggle(n) => self.row(n)?.toggle().trigger(),
            Command::Edit(n) => self.row(n)?.start_editing(),
            Command::Save { row, text } => self.row(row)?.finish_editing(text),
            Command::Remove(n) => {
                let id = self.row(n)?.id().to_string();
                self.store.remove().call(id);
            }
            Command::ToggleAll(on) => self.store.toggle_all().call(on),
            Command::ClearCompleted => self.store.clear_completed().trigger(),
            Command::Route(route) => self.store.router().navigate(&route),
            Command::Dump => return Ok(Outcome::Continue(Some(self.dump()))),
            Command::Help => return Ok(Outcome::Continue(Some(HELP.to_string()))),
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue(None))
    }

    /// The full list as pretty JSON.
    #[must_use]
    pub fn dump(&self) -> String {
        let todos = self.store.todos();
        serde_json::to_string_pretty(&todos).unwrap_or_else(|err| format!("<unserializable: {err}>"))
    }

    fn row(&self, number: usize) -> Result<TodoItem, CommandError> {
        number
            .checked_sub(1)
            .and_then(|index| self.store.items().into_iter().nth(index))
            .ok_or(CommandError::NoSuchRow(number))
    }
}
