//! What the reader sees for one section.

use sa_core::{Media, Section, SectionId, Story};
use sa_script::ScriptError;

/// A rendered section: substituted text, media and the choices on offer.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// The section being shown.
    pub id: SectionId,
    /// Section text with variables substituted.
    pub text: String,
    /// Media reference, if the section has one with a source.
    pub media: Option<Media>,
    /// Choices in display order.
    pub choices: Vec<SceneChoice>,
    /// Failures from the section's entry script. Empty when the scene was
    /// re-rendered rather than entered.
    pub script_errors: Vec<ScriptError>,
}

/// One choice as shown to the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneChoice {
    /// Position in the section's choice list.
    pub index: usize,
    /// Display text with variables substituted.
    pub text: String,
    /// Section the choice leads to.
    pub target: SectionId,
    /// True when the choice has no text and is shown as a plain continue.
    pub auto_advance: bool,
}

impl Scene {
    pub(crate) fn render(story: &Story, id: &SectionId, section: &Section) -> Self {
        let choices = section
            .choices()
            .iter()
            .enumerate()
            .map(|(index, choice)| SceneChoice {
                index,
                text: story.substitute(&choice.text),
                target: choice.next.clone(),
                auto_advance: choice.is_auto_advance(),
            })
            .collect();
        Self {
            id: id.clone(),
            text: story.substitute(&section.raw_text()),
            media: section.media.clone().filter(Media::has_src),
            choices,
            script_errors: Vec::new(),
        }
    }

    /// True when there is nowhere left to go.
    pub fn is_ending(&self) -> bool {
        self.choices.is_empty()
    }
}
