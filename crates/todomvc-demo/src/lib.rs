#![forbid(unsafe_code)]

//! Text front end for the to-do store.
//!
//! The binary reads one [`Command`] per line, applies it through a
//! [`Session`] and redraws with [`render`] whenever the [`Screen`] reports a
//! change.

pub mod command;
pub mod render;
pub mod session;

pub use command::{Command, CommandError};
pub use render::{Screen, render};
pub use session::{Outcome, Session};
