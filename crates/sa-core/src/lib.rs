//! Core types for Story Adventure: the story document and its play state.
//!
//! A [`Story`] is a directed graph of [`Section`]s connected by [`Choice`]s,
//! plus an optional [`PlayState`] that records where a reader currently is.
//! This crate holds data and invariants only. Script execution lives in
//! `sa-script`, playback and path search in `sa-play`.

/// Error types used throughout the crate.
pub mod error;
/// Section identifiers and scalar values.
pub mod id;
/// Sections, choices, media references, and raw script entries.
pub mod section;
/// Mutable play state attached to a story.
pub mod state;
/// The story document and its authoring operations.
pub mod story;
/// Text-valued story variables.
pub mod variables;

pub use error::{StoryError, StoryResult};
pub use id::{Scalar, SectionId, format_number};
pub use section::{Choice, Media, ScriptEntry, Section};
pub use state::PlayState;
pub use story::{Story, StoryMeta};
pub use variables::Variables;
