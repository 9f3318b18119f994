//! Configuration for playback and linearization.

/// Configuration for a play session and for linearized output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayConfig {
    /// Maximum number of history entries kept for `back`. `None` keeps all.
    pub history_limit: Option<usize>,
    /// Emit `![](src)` lines for section media when linearizing.
    pub include_media: bool,
    /// Substitute `${name}` tokens from the story's variables when
    /// linearizing.
    pub substitute_variables: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            include_media: true,
            substitute_variables: true,
        }
    }
}

impl PlayConfig {
    /// Bound the undo history (0 disables `back`).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Include or omit media references in linearized text.
    pub fn with_media(mut self, include: bool) -> Self {
        self.include_media = include;
        self
    }

    /// Enable or disable variable substitution in linearized text.
    pub fn with_substitution(mut self, substitute: bool) -> Self {
        self.substitute_variables = substitute;
        self
    }
}
