//! Typed actions.

use sa_core::{Scalar, ScriptEntry, SectionId};

use crate::catalog::{ActionKind, ParamType};
use crate::error::{ScriptError, ScriptResult};
use crate::value::CompareOp;

/// One parsed action. Conditional kinds hold the action they chain to.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Does nothing.
    None,
    /// Assign a variable.
    Set {
        /// Variable name.
        variable: String,
        /// New value.
        value: String,
    },
    /// Ask the input provider for a value; without one, same as `Set` with
    /// the prompt as value.
    Input {
        /// Variable name.
        variable: String,
        /// Text shown to the reader.
        prompt: String,
    },
    /// Numeric addition on a text variable.
    AddToVariable {
        /// Variable name.
        variable: String,
        /// Amount to add, as text.
        amount: String,
    },
    /// Run `then` when `variable` is set and compares true against `value`.
    CompareDo {
        /// Variable name.
        variable: String,
        /// Comparison operator.
        op: CompareOp,
        /// Right-hand side of the comparison.
        value: String,
        /// Action run when the comparison holds.
        then: Box<Action>,
    },
    /// Run `then` when `variable` is set.
    IfSetDo {
        /// Variable name.
        variable: String,
        /// Action run when the variable is set.
        then: Box<Action>,
    },
    /// Run `then` when `variable` is not set.
    IfNotSetDo {
        /// Variable name.
        variable: String,
        /// Action run when the variable is not set.
        then: Box<Action>,
    },
    /// Append a choice to the current section unless an identical one exists.
    AddChoice {
        /// Section the choice leads to.
        target: SectionId,
        /// Choice text.
        text: String,
    },
    /// Remove the first choice on the current section leading to `target`.
    RemoveChoice {
        /// Section the removed choice leads to.
        target: SectionId,
    },
    /// `AddChoice` guarded by `variable` being set.
    IfSetAddChoice {
        /// Variable name.
        variable: String,
        /// Section the choice leads to.
        target: SectionId,
        /// Choice text.
        text: String,
    },
    /// `RemoveChoice` guarded by `variable` being set.
    IfSetRemoveChoice {
        /// Variable name.
        variable: String,
        /// Section the removed choice leads to.
        target: SectionId,
    },
}

impl Action {
    /// Parse a document script entry.
    pub fn parse(entry: &ScriptEntry) -> ScriptResult<Self> {
        Self::parse_parts(&entry.action, &entry.parameters)
    }

    /// Parse an action name and its positional parameters. Parameters beyond
    /// those the kind (and any chained action) consumes are ignored.
    pub fn parse_parts(name: &str, params: &[Scalar]) -> ScriptResult<Self> {
        let kind = ActionKind::from_name(name).ok_or_else(|| ScriptError::UnknownActionKind {
            name: name.to_string(),
            suggestion: ActionKind::suggest(name).map(str::to_string),
        })?;

        let expected = kind.parameters().len();
        if params.len() < expected {
            return Err(ScriptError::InvalidParameterCount {
                kind,
                expected,
                found: params.len(),
            });
        }

        let text = |i: usize| params[i].as_text().into_owned();
        let section = |i: usize| SectionId::from(&params[i]);
        let chained = |i: usize| {
            Self::parse_parts(&params[i].as_text(), &params[i + 1..]).map(Box::new)
        };

        let action = match kind {
            ActionKind::None => Action::None,
            ActionKind::Set => Action::Set {
                variable: text(0),
                value: text(1),
            },
            ActionKind::Input => Action::Input {
                variable: text(0),
                prompt: text(1),
            },
            ActionKind::AddToVariable => Action::AddToVariable {
                variable: text(0),
                amount: text(1),
            },
            ActionKind::CompareDo => {
                let token = text(1);
                let Some(op) = CompareOp::from_token(&token) else {
                    return Err(ScriptError::InvalidEnumValue {
                        kind,
                        value: token,
                        allowed: kind.enum_values(),
                    });
                };
                Action::CompareDo {
                    variable: text(0),
                    op,
                    value: text(2),
                    then: chained(3)?,
                }
            }
            ActionKind::IfSetDo => Action::IfSetDo {
                variable: text(0),
                then: chained(1)?,
            },
            ActionKind::IfNotSetDo => Action::IfNotSetDo {
                variable: text(0),
                then: chained(1)?,
            },
            ActionKind::AddChoice => Action::AddChoice {
                target: section(0),
                text: text(1),
            },
            ActionKind::RemoveChoice => Action::RemoveChoice { target: section(0) },
            ActionKind::IfSetAddChoice => Action::IfSetAddChoice {
                variable: text(0),
                target: section(1),
                text: text(2),
            },
            ActionKind::IfSetRemoveChoice => Action::IfSetRemoveChoice {
                variable: text(0),
                target: section(1),
            },
        };
        Ok(action)
    }

    /// The catalog kind of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::None => ActionKind::None,
            Action::Set { .. } => ActionKind::Set,
            Action::Input { .. } => ActionKind::Input,
            Action::AddToVariable { .. } => ActionKind::AddToVariable,
            Action::CompareDo { .. } => ActionKind::CompareDo,
            Action::IfSetDo { .. } => ActionKind::IfSetDo,
            Action::IfNotSetDo { .. } => ActionKind::IfNotSetDo,
            Action::AddChoice { .. } => ActionKind::AddChoice,
            Action::RemoveChoice { .. } => ActionKind::RemoveChoice,
            Action::IfSetAddChoice { .. } => ActionKind::IfSetAddChoice,
            Action::IfSetRemoveChoice { .. } => ActionKind::IfSetRemoveChoice,
        }
    }

    /// Flatten back into positional parameters, nested actions inline.
    fn write_params(&self, out: &mut Vec<Scalar>) {
        let text = |s: &str| Scalar::from(s);
        let section = |id: &SectionId| id.as_scalar().clone();
        match self {
            Action::None => {}
            Action::Set { variable, value: s }
            | Action::Input { variable, prompt: s }
            | Action::AddToVariable { variable, amount: s } => {
                out.extend([text(variable), text(s)]);
            }
            Action::CompareDo {
                variable,
                op,
                value,
                then,
            } => {
                out.extend([text(variable), text(op.token()), text(value)]);
                out.push(text(then.kind().name()));
                then.write_params(out);
            }
            Action::IfSetDo { variable, then } | Action::IfNotSetDo { variable, then } => {
                out.push(text(variable));
                out.push(text(then.kind().name()));
                then.write_params(out);
            }
            Action::AddChoice { target, text: s } => out.extend([section(target), text(s)]),
            Action::RemoveChoice { target } => out.push(section(target)),
            Action::IfSetAddChoice {
                variable,
                target,
                text: s,
            } => out.extend([text(variable), section(target), text(s)]),
            Action::IfSetRemoveChoice { variable, target } => {
                out.extend([text(variable), section(target)]);
            }
        }
    }
}

impl From<&Action> for ScriptEntry {
    fn from(action: &Action) -> Self {
        let mut parameters = Vec::new();
        action.write_params(&mut parameters);
        ScriptEntry {
            action: action.kind().name().to_string(),
            parameters,
        }
    }
}

/// Parameter types an entry is expected to carry, nested slots expanded.
/// Stops at the first name that is not in the catalog.
pub fn expected_types(entry: &ScriptEntry) -> Vec<ParamType> {
    let mut types = Vec::new();
    let mut name = entry.action.clone();
    let mut offset = 0;
    while let Some(kind) = ActionKind::from_name(&name) {
        let declared = kind.parameters();
        types.extend_from_slice(declared);
        if !kind.chains() {
            break;
        }
        let slot = offset + declared.len() - 1;
        match entry.parameters.get(slot) {
            Some(next) => {
                name = next.as_text().into_owned();
                offset = slot + 1;
            }
            None => break,
        }
    }
    types
}
