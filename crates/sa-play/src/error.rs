//! Error types for playback.

use thiserror::Error;

use sa_core::SectionId;
use sa_script::ScriptError;

/// Result type for playback operations.
pub type PlayResult<T> = Result<T, PlayError>;

/// Errors that can occur while playing a story.
///
/// Every one of these leaves the session on its last good section.
#[derive(Debug, Error)]
pub enum PlayError {
    /// A section named by a choice, the history or a save does not exist.
    #[error("section {0} is missing from the story")]
    MissingSection(SectionId),

    /// The story has no sections to play.
    #[error("the story has no sections")]
    EmptyStory,

    /// Playback has not been started.
    #[error("no section is being played")]
    NotPlaying,

    /// A choice position outside the current scene's choices.
    #[error("there is no choice {index} (the scene has {available})")]
    InvalidChoice {
        /// Requested position.
        index: usize,
        /// Number of choices on offer.
        available: usize,
    },

    /// A save was restored into a story without a title.
    #[error("no story is loaded to restore the save into")]
    NoStoryLoaded,

    /// A save belongs to a different story.
    #[error("save is for \"{save}\" but the story is \"{story}\"")]
    TitleMismatch {
        /// Title of the loaded story.
        story: String,
        /// Title recorded in the save.
        save: String,
    },

    /// Script error that aborted an entry script.
    #[error("{0}")]
    Script(#[from] ScriptError),

    /// A save file could not be parsed or written.
    #[error("invalid save game: {0}")]
    Json(#[from] serde_json::Error),
}
