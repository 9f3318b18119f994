//! Script interpreter for Story Adventure.
//!
//! Sections carry small scripts: ordered lists of actions drawn from a fixed
//! catalog ([`ActionKind`]). Each action takes a fixed list of positional
//! parameters; the conditional kinds end in a nested action whose own
//! parameters follow inline. This crate parses the document's raw
//! [`ScriptEntry`](sa_core::ScriptEntry) values into typed [`Action`]s and
//! executes them against a [`Story`](sa_core::Story).

/// Typed actions and their parsing from the wire form.
pub mod action;
/// The closed catalog of action kinds and their parameter shapes.
pub mod catalog;
/// Error types for parsing and executing scripts.
pub mod error;
/// Execution of actions and scripts.
pub mod interpreter;
/// Text/number conversions and comparisons.
pub mod value;

pub use action::Action;
pub use catalog::{ActionKind, ParamType};
pub use error::{ScriptError, ScriptResult};
pub use interpreter::{
    InputProvider, Interpreter, NoInput, Outcome, ScriptReport, execute, run_script,
    validate_script,
};
pub use value::{CompareOp, compare};
