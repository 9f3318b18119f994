//! The closed catalog of action kinds.

use std::fmt;

use strsim::jaro_winkler;

use crate::value::CompareOp;

/// Minimum similarity for suggesting a catalog name in place of an unknown one.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Declared type of a positional parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Literal text.
    String,
    /// A variable name.
    Variable,
    /// A section identifier.
    Section,
    /// One token from the kind's closed set.
    Enum,
    /// The name of a nested action, followed inline by that action's own
    /// parameters.
    Action,
}

impl ParamType {
    /// Name shown in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ParamType::String => "STRING",
            ParamType::Variable => "VARIABLE",
            ParamType::Section => "SECTION",
            ParamType::Enum => "ENUM",
            ParamType::Action => "ACTION",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every action a script may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// `NONE`: does nothing.
    None,
    /// `SET variable value`.
    Set,
    /// `INPUT variable prompt`.
    Input,
    /// `ADD_TO_VARIABLE variable amount`.
    AddToVariable,
    /// `COMPARE_DO variable op value ACTION...`.
    CompareDo,
    /// `IF_SET_DO variable ACTION...`.
    IfSetDo,
    /// `IF_NOT_SET_DO variable ACTION...`.
    IfNotSetDo,
    /// `ADD_CHOICE section text`.
    AddChoice,
    /// `REMOVE_CHOICE section`.
    RemoveChoice,
    /// `IF_SET_ADD_CHOICE variable section text`.
    IfSetAddChoice,
    /// `IF_SET_REMOVE_CHOICE variable section`.
    IfSetRemoveChoice,
}

impl ActionKind {
    /// All kinds in catalog order.
    pub const ALL: [ActionKind; 11] = [
        ActionKind::None,
        ActionKind::Input,
        ActionKind::Set,
        ActionKind::AddToVariable,
        ActionKind::CompareDo,
        ActionKind::IfSetDo,
        ActionKind::IfNotSetDo,
        ActionKind::AddChoice,
        ActionKind::RemoveChoice,
        ActionKind::IfSetAddChoice,
        ActionKind::IfSetRemoveChoice,
    ];

    /// The name used in story documents.
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::None => "NONE",
            ActionKind::Set => "SET",
            ActionKind::Input => "INPUT",
            ActionKind::AddToVariable => "ADD_TO_VARIABLE",
            ActionKind::CompareDo => "COMPARE_DO",
            ActionKind::IfSetDo => "IF_SET_DO",
            ActionKind::IfNotSetDo => "IF_NOT_SET_DO",
            ActionKind::AddChoice => "ADD_CHOICE",
            ActionKind::RemoveChoice => "REMOVE_CHOICE",
            ActionKind::IfSetAddChoice => "IF_SET_ADD_CHOICE",
            ActionKind::IfSetRemoveChoice => "IF_SET_REMOVE_CHOICE",
        }
    }

    /// Look up a kind by its exact document name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// The declared parameter slots. An `Action` slot is always last; the
    /// nested action's parameters follow it without being declared here.
    pub fn parameters(self) -> &'static [ParamType] {
        use ParamType::*;
        match self {
            ActionKind::None => &[],
            ActionKind::Set | ActionKind::Input | ActionKind::AddToVariable => &[Variable, String],
            ActionKind::CompareDo => &[Variable, Enum, String, Action],
            ActionKind::IfSetDo | ActionKind::IfNotSetDo => &[Variable, Action],
            ActionKind::AddChoice => &[Section, String],
            ActionKind::RemoveChoice => &[Section],
            ActionKind::IfSetAddChoice => &[Variable, Section, String],
            ActionKind::IfSetRemoveChoice => &[Variable, Section],
        }
    }

    /// Tokens accepted by this kind's `Enum` slot, empty if it has none.
    pub fn enum_values(self) -> &'static [&'static str] {
        match self {
            ActionKind::CompareDo => CompareOp::TOKENS,
            _ => &[],
        }
    }

    /// True for kinds that chain to a nested action.
    pub fn chains(self) -> bool {
        self.parameters().last() == Some(&ParamType::Action)
    }

    /// The catalog name closest to `name`, if one is close enough.
    pub fn suggest(name: &str) -> Option<&'static str> {
        let upper = name.to_uppercase();
        Self::ALL
            .into_iter()
            .map(|k| (k.name(), jaro_winkler(&upper, k.name())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| name)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
