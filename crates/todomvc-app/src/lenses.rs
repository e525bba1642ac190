#![forbid(unsafe_code)]

//! Field lenses for [`ToDo`].

use todomvc_runtime::field_lens;
use todomvc_runtime::store::Field;

use crate::model::ToDo;

pub const TEXT: Field<ToDo, String> = field_lens!(ToDo, text: String);
pub const COMPLETED: Field<ToDo, bool> = field_lens!(ToDo, completed: bool);
pub const EDITING: Field<ToDo, bool> = field_lens!(ToDo, editing: bool);
