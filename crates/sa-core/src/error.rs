use crate::id::SectionId;

/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur when reading or editing a story document.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// The referenced section does not exist in the story.
    #[error("section {0} is missing from the story")]
    MissingSection(SectionId),

    /// A choice position is out of range for its section.
    #[error("section {section} has no choice at position {index}")]
    MissingChoice {
        /// The owning section.
        section: SectionId,
        /// The requested position.
        index: usize,
    },

    /// Every integer id up to `i64::MAX` is taken.
    #[error("no integer section id is left to allocate")]
    IdsExhausted,

    /// The document could not be parsed or written as JSON.
    #[error("invalid story document: {0}")]
    Json(#[from] serde_json::Error),
}
