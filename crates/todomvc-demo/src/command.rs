#![forbid(unsafe_code)]

//! Line commands accepted by the front end.
//!
//! One command per line; the first word selects the command. Row numbers are
//! 1-based positions in the currently rendered (filtered) list.
//!
//! | Line | Effect |
//! |------|--------|
//! | `add <text>` | append a task |
//! | `toggle <n>` | flip row `n` |
//! | `edit <n>` | put row `n` in edit mode |
//! | `save <n> <text>` | store new text for row `n`, leave edit mode |
//! | `remove <n>` | delete row `n` |
//! | `all on` / `all off` | mark every task completed / active |
//! | `clear` | delete completed tasks |
//! | `route <route>` | switch filter (`/`, `/active`, `#/completed`) |
//! | `dump` | print the list as JSON |
//! | `help` | list commands |
//! | `quit` | exit |

use thiserror::Error;

/// A parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(usize),
    Edit(usize),
    Save { row: usize, text: String },
    Remove(usize),
    ToggleAll(bool),
    ClearCompleted,
    Route(String),
    Dump,
    Help,
    Quit,
}

/// Why a line could not be turned into a [`Command`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{0}' is not a row number")]
    BadRow(String),
    #[error("no row {0}")]
    NoSuchRow(usize),
    #[error("expected 'on' or 'off', got '{0}'")]
    BadSwitch(String),
}

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  add <text>         append a task
  toggle <n>         flip row n
  edit <n>           edit row n
  save <n> <text>    store text for row n
  remove <n>         delete row n
  all on|off         mark every task completed / active
  clear              delete completed tasks
  route <route>      show /, /active or /completed
  dump               print the list as JSON
  quit               exit";

impl Command {
    /// Parse one line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            // Text is kept as typed; the store decides what empty means.
            "add" => Self::Add(rest.to_string()),
            "toggle" => Self::Toggle(row("toggle", rest)?),
            "edit" => Self::Edit(row("edit", rest)?),
            "save" => {
                let (n, text) = match rest.split_once(char::is_whitespace) {
                    Some((n, text)) => (n, text.trim()),
                    None => (rest, ""),
                };
                Self::Save {
                    row: row("save", n)?,
                    text: text.to_string(),
                }
            }
            "remove" | "rm" => Self::Remove(row("remove", rest)?),
            "all" => match rest {
                "on" => Self::ToggleAll(true),
                "off" => Self::ToggleAll(false),
                "" => {
                    return Err(CommandError::MissingArgument {
                        command: "all",
                        argument: "'on' or 'off'",
                    });
                }
                other => return Err(CommandError::BadSwitch(other.to_string())),
            },
            "clear" => Self::ClearCompleted,
            "route" | "show" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "route",
                        argument: "a route",
                    });
                }
                Self::Route(rest.to_string())
            }
            "dump" => Self::Dump,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn row(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a row number",
        });
    }
    match arg.parse::<usize>() {
        Ok(0) => Err(CommandError::NoSuchRow(0)),
        Ok(n) => Ok(n),
        Err(_) => Err(CommandError::BadRow(arg.to_string())),
    }
}
