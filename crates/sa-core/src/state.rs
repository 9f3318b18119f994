use serde::{Deserialize, Serialize};

use crate::id::SectionId;
use crate::variables::Variables;

/// Where a reader is in a story and what they have done so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayState {
    /// The section being read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_section: Option<SectionId>,
    /// Previously visited sections, most recent last. Used as an undo stack.
    #[serde(default)]
    pub history: Vec<SectionId>,
    /// Story variables.
    #[serde(default, skip_serializing_if = "Variables::is_empty")]
    pub variables: Variables,
}

impl PlayState {
    /// Create an empty play state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push onto the undo stack, dropping the oldest entries beyond `limit`.
    pub fn push_history(&mut self, id: SectionId, limit: Option<usize>) {
        self.history.push(id);
        if let Some(limit) = limit
            && self.history.len() > limit
        {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
    }

    /// Pop the most recent history entry.
    pub fn pop_history(&mut self) -> Option<SectionId> {
        self.history.pop()
    }
}
