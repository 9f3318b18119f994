//! Error types for the script interpreter.

use thiserror::Error;

use sa_core::SectionId;

use crate::catalog::ActionKind;

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors raised while parsing or executing a single action.
///
/// None of these stop a script: the failing action is abandoned and the
/// next one runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    /// The action name is not in the catalog.
    #[error("no such action: {name}{}", hint(.suggestion))]
    UnknownActionKind {
        /// The name found in the script.
        name: String,
        /// Closest catalog name, if any is close enough.
        suggestion: Option<String>,
    },

    /// Fewer parameters than the action declares.
    #[error("too few parameters for {kind}: expected {expected}, found {found}")]
    InvalidParameterCount {
        /// The action kind.
        kind: ActionKind,
        /// Number of declared parameters.
        expected: usize,
        /// Number of parameters supplied.
        found: usize,
    },

    /// An ENUM parameter outside the kind's declared set.
    #[error("bad value {value:?} for {kind}, expected one of {}", .allowed.join(" "))]
    InvalidEnumValue {
        /// The action kind.
        kind: ActionKind,
        /// The value found in the script.
        value: String,
        /// The accepted tokens.
        allowed: &'static [&'static str],
    },

    /// The current section named by the play state does not exist.
    #[error("section {0} is missing from the story")]
    MissingSection(SectionId),
}

fn hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean {s}?)"))
        .unwrap_or_default()
}
