//! Save games: a story's metadata plus its play state.

use serde::{Deserialize, Serialize};

use sa_core::{PlayState, Story, StoryMeta};

use crate::error::PlayResult;

/// Progress through a story, stored apart from the story itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    /// Metadata of the story the save belongs to.
    #[serde(default)]
    pub meta: StoryMeta,
    /// Current section, history and variables.
    #[serde(default)]
    pub state: PlayState,
}

impl SaveGame {
    /// Capture the play state of a story.
    pub fn capture(story: &Story) -> Self {
        Self {
            meta: story.meta.clone(),
            state: story.state.clone().unwrap_or_default(),
        }
    }

    /// Parse a save from JSON.
    pub fn from_json(json: &str) -> PlayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the save as pretty-printed JSON.
    pub fn to_json(&self) -> PlayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Default file name for saves of `story`.
    pub fn file_name(story: &Story) -> String {
        format!("{}_save.json", story.file_safe_title())
    }
}
