use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};
use crate::id::{Scalar, SectionId};
use crate::section::{Choice, Media, Section};
use crate::state::PlayState;
use crate::variables::Variables;

/// Free-form metadata about the story. Only the title has a meaning here;
/// everything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryMeta {
    /// Story title. Save games are matched against it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Any other metadata.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The story document: the section graph plus optional play state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Title and other metadata.
    #[serde(default)]
    pub meta: StoryMeta,
    /// Sections keyed by id.
    #[serde(default)]
    pub sections: BTreeMap<SectionId, Section>,
    /// Reader progress, if any has been recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PlayState>,
}

impl Story {
    /// Create an empty story with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            meta: StoryMeta {
                title: Some(title.into()),
                ..StoryMeta::default()
            },
            ..Self::default()
        }
    }

    /// Parse a story document from JSON.
    pub fn from_json(json: &str) -> StoryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the document as pretty-printed JSON.
    pub fn to_json(&self) -> StoryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builder-style section insertion.
    pub fn with_section(mut self, id: impl Into<SectionId>, section: Section) -> Self {
        self.sections.insert(id.into(), section);
        self
    }

    /// The story title, if any.
    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }

    /// The title with everything outside `[A-Za-z0-9_-]` replaced by `_`,
    /// suitable for file names.
    pub fn file_safe_title(&self) -> String {
        match self.title() {
            Some(title) => title
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect(),
            None => "story_adventure".to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // Sections
    // -----------------------------------------------------------------------

    /// Look up a section.
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.get(id)
    }

    /// Look up a section for editing.
    pub fn section_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.sections.get_mut(id)
    }

    /// Like [`section`](Self::section) but reports a missing id as an error.
    pub fn require_section(&self, id: &SectionId) -> StoryResult<&Section> {
        self.sections
            .get(id)
            .ok_or_else(|| StoryError::MissingSection(id.clone()))
    }

    /// True when `id` names a section.
    pub fn contains_section(&self, id: &SectionId) -> bool {
        self.sections.contains_key(id)
    }

    /// The first section in id order: lowest numeric id, else the
    /// lexicographically first text id.
    pub fn first_section_id(&self) -> Option<&SectionId> {
        self.sections.keys().next()
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of choices across all sections.
    pub fn choice_count(&self) -> usize {
        self.sections.values().map(|s| s.choices().len()).sum()
    }

    // -----------------------------------------------------------------------
    // Play state
    // -----------------------------------------------------------------------

    /// The play state, created on first use.
    pub fn state_mut(&mut self) -> &mut PlayState {
        self.state.get_or_insert_with(PlayState::default)
    }

    /// The section play state points at.
    pub fn current_section_id(&self) -> Option<&SectionId> {
        self.state.as_ref()?.current_section.as_ref()
    }

    /// The story's variables, if play state exists.
    pub fn variables(&self) -> Option<&Variables> {
        self.state.as_ref().map(|s| &s.variables)
    }

    /// Mutable variables, creating play state on first use.
    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.state_mut().variables
    }

    /// Substitute `${name}` tokens using the current variables.
    pub fn substitute(&self, text: &str) -> String {
        match self.variables() {
            Some(vars) => vars.substitute(text),
            None => text.to_string(),
        }
    }

    /// A section's text with variables substituted. Missing sections yield
    /// empty text.
    pub fn section_text(&self, id: &SectionId) -> String {
        self.section(id)
            .map(|s| self.substitute(&s.raw_text()))
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Graph classification
    // -----------------------------------------------------------------------

    /// Sections that are never the target of any choice.
    pub fn roots(&self) -> Vec<&SectionId> {
        let targets: BTreeSet<&SectionId> = self
            .sections
            .values()
            .flat_map(|s| s.choices().iter().map(|c| &c.next))
            .collect();
        self.sections
            .keys()
            .filter(|id| !targets.contains(id))
            .collect()
    }

    /// Sections without outgoing choices.
    pub fn leaves(&self) -> Vec<&SectionId> {
        self.sections
            .iter()
            .filter(|(_, s)| s.is_leaf())
            .map(|(id, _)| id)
            .collect()
    }

    /// True when `id` exists and no choice leads to it.
    pub fn is_root(&self, id: &SectionId) -> bool {
        self.contains_section(id)
            && !self
                .sections
                .values()
                .any(|s| s.choices().iter().any(|c| &c.next == id))
    }

    /// True when `id` exists and has no choices.
    pub fn is_leaf(&self, id: &SectionId) -> bool {
        self.section(id).is_some_and(Section::is_leaf)
    }

    /// Choices whose target does not exist, as `(owner, position, target)`.
    ///
    /// Authoring may leave a story in this state; it only becomes an error
    /// once playback tries to follow such a choice.
    pub fn dangling_choices(&self) -> Vec<(&SectionId, usize, &SectionId)> {
        self.sections
            .iter()
            .flat_map(|(id, s)| {
                s.choices()
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| !self.sections.contains_key(&c.next))
                    .map(move |(i, c)| (id, i, &c.next))
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Authoring
    // -----------------------------------------------------------------------

    /// Insert a new section with one empty text line under the next free
    /// integer id, and return that id.
    pub fn add_section(&mut self) -> StoryResult<SectionId> {
        let next = self
            .sections
            .keys()
            .filter_map(SectionId::as_int)
            .fold(0, i64::max)
            .checked_add(1)
            .ok_or(StoryError::IdsExhausted)?;
        let id = SectionId::from(Scalar::Int(next));
        self.sections
            .insert(id.clone(), Section::from_lines([String::new()]));
        tracing::debug!(%id, "section added");
        Ok(id)
    }

    /// Append a choice to `from`. Duplicates are allowed here; only script
    /// actions refuse them.
    pub fn add_choice(
        &mut self,
        from: &SectionId,
        target: impl Into<SectionId>,
        text: impl Into<String>,
    ) -> StoryResult<usize> {
        let section = self.require_section_mut(from)?;
        let choices = section.choices_mut();
        choices.push(Choice::new(target, text));
        Ok(choices.len() - 1)
    }

    /// Remove a section and every choice pointing at it.
    pub fn remove_section(&mut self, id: &SectionId) -> StoryResult<Section> {
        let removed = self
            .sections
            .remove(id)
            .ok_or_else(|| StoryError::MissingSection(id.clone()))?;
        for section in self.sections.values_mut() {
            if let Some(next) = section.next.as_mut() {
                next.retain(|c| &c.next != id);
            }
        }
        tracing::debug!(%id, "section removed");
        Ok(removed)
    }

    /// Remove the choice at `index` on `from`.
    pub fn remove_choice(&mut self, from: &SectionId, index: usize) -> StoryResult<Choice> {
        let section = self.require_section_mut(from)?;
        match section.next.as_mut() {
            Some(next) if index < next.len() => Ok(next.remove(index)),
            _ => Err(StoryError::MissingChoice {
                section: from.clone(),
                index,
            }),
        }
    }

    /// Replace a section's text. Stored as lines.
    pub fn set_text(&mut self, id: &SectionId, text: &str) -> StoryResult<()> {
        let section = self.require_section_mut(id)?;
        section.text = None;
        section.text_lines = Some(text.split('\n').map(str::to_string).collect());
        Ok(())
    }

    /// Attach media to a section, replacing any it had.
    pub fn set_media(&mut self, id: &SectionId, media: Media) -> StoryResult<()> {
        self.require_section_mut(id)?.media = Some(media);
        Ok(())
    }

    /// Remove a section's media.
    pub fn clear_media(&mut self, id: &SectionId) -> StoryResult<Option<Media>> {
        Ok(self.require_section_mut(id)?.media.take())
    }

    fn require_section_mut(&mut self, id: &SectionId) -> StoryResult<&mut Section> {
        self.sections
            .get_mut(id)
            .ok_or_else(|| StoryError::MissingSection(id.clone()))
    }

    /// Declare a variable with an empty value.
    pub fn add_variable(&mut self, name: impl Into<String>) {
        self.variables_mut().declare(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::ScriptEntry;

    fn branching() -> Story {
        Story::new("Branches")
            .with_section(1, Section::new("start").with_choice(2, "a").with_choice(4, "b"))
            .with_section(2, Section::new("middle").with_choice(3, ""))
            .with_section(3, Section::new("end"))
            .with_section(4, Section::new("other end"))
    }

    fn ids(ids: Vec<&SectionId>) -> Vec<String> {
        ids.into_iter().map(ToString::to_string).collect()
    }

    #[test]
    fn classifies_roots_and_leaves() {
        let story = branching();
        assert_eq!(ids(story.roots()), ["1"]);
        assert_eq!(ids(story.leaves()), ["3", "4"]);
        assert!(story.is_root(&SectionId::from(1)));
        assert!(!story.is_root(&SectionId::from(3)));
        assert!(story.is_leaf(&SectionId::from("4")));
    }

    #[test]
    fn empty_next_is_still_a_leaf() {
        let mut story = branching();
        story.section_mut(&SectionId::from(3)).unwrap().next = Some(Vec::new());
        assert!(story.is_leaf(&SectionId::from(3)));
    }

    #[test]
    fn dangling_choices_are_reported() {
        let mut story = branching();
        story.add_choice(&SectionId::from(4), 99, "nowhere").unwrap();
        let dangling = story.dangling_choices();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].0, &SectionId::from(4));
        assert_eq!(dangling[0].2, &SectionId::from(99));
    }

    #[test]
    fn add_section_uses_next_integer_id() {
        let mut story = branching().with_section("epilogue", Section::new("..."));
        assert_eq!(story.add_section().unwrap(), SectionId::from(5));
        assert_eq!(Story::default().add_section().unwrap(), SectionId::from(1));
    }

    #[test]
    fn add_section_fails_when_ids_run_out() {
        let mut story = Story::default().with_section(i64::MAX, Section::new("last"));
        assert!(matches!(story.add_section(), Err(StoryError::IdsExhausted)));
        assert_eq!(story.section_count(), 1);
    }

    #[test]
    fn remove_section_drops_incoming_choices() {
        let mut story = branching();
        story.remove_section(&SectionId::from(2)).unwrap();
        let start = story.section(&SectionId::from(1)).unwrap();
        assert_eq!(start.choices().len(), 1);
        assert_eq!(start.choices()[0].next, SectionId::from(4));
        assert!(story.remove_section(&SectionId::from(2)).is_err());
    }

    #[test]
    fn remove_choice_by_position() {
        let mut story = branching();
        let removed = story.remove_choice(&SectionId::from(1), 0).unwrap();
        assert_eq!(removed.text, "a");
        assert!(matches!(
            story.remove_choice(&SectionId::from(1), 5),
            Err(StoryError::MissingChoice { index: 5, .. })
        ));
    }

    #[test]
    fn media_can_be_set_and_cleared() {
        let mut story = branching();
        let id = SectionId::from(3);
        story.set_media(&id, Media::image("end.png")).unwrap();
        assert_eq!(story.section(&id).unwrap().media, Some(Media::image("end.png")));
        assert_eq!(story.clear_media(&id).unwrap(), Some(Media::image("end.png")));
        assert!(story.section(&id).unwrap().media.is_none());
        assert!(story.set_media(&SectionId::from(9), Media::image("x")).is_err());
    }

    #[test]
    fn file_safe_title() {
        assert_eq!(Story::new("The Cave: Part 2!").file_safe_title(), "The_Cave__Part_2_");
        assert_eq!(Story::default().file_safe_title(), "story_adventure");
    }

    #[test]
    fn section_text_substitutes_variables() {
        let mut story = branching().with_section(9, Section::new("Hi ${name}"));
        assert_eq!(story.section_text(&SectionId::from(9)), "Hi ${name}");
        story.variables_mut().set("name", "Ada");
        assert_eq!(story.section_text(&SectionId::from(9)), "Hi Ada");
        assert_eq!(story.section_text(&SectionId::from(404)), "");
    }

    #[test]
    fn document_round_trip() {
        let json = r#"{
            "meta": {"title": "Cave", "author": "someone"},
            "sections": {
                "1": {
                    "id": 1,
                    "text_lines": ["Dark.", "Very dark."],
                    "media": {"type": "image", "src": "data:image/png;base64,AAAA"},
                    "next": [{"text": "", "next": 2}, {"text": "Back", "next": "start"}],
                    "script": [{"action": "COMPARE_DO", "parameters": ["gold", ">", "3", "SET", "rich", "yes"]}]
                },
                "2": {"text": "End"},
                "start": {"text": "Begin", "next": [{"text": "In", "next": "1"}]}
            },
            "state": {"current_section": "1", "history": ["start"], "variables": {"gold": "4"}}
        }"#;
        let story = Story::from_json(json).unwrap();
        assert_eq!(story.meta.extra["author"], "someone");
        assert_eq!(story.variables().unwrap().get("gold"), Some("4"));

        let again = Story::from_json(&story.to_json().unwrap()).unwrap();
        assert_eq!(again, story);
    }

    #[test]
    fn script_entries_survive_round_trip() {
        let story = Story::new("s").with_section(
            1,
            Section::new("x").with_action(ScriptEntry::new("ADD_CHOICE", ["2", "go"])),
        );
        let again = Story::from_json(&story.to_json().unwrap()).unwrap();
        assert_eq!(again.section(&SectionId::from(1)).unwrap().script().len(), 1);
    }

    #[test]
    fn fractional_script_parameters_load() {
        let json = r#"{"sections": {"1": {"text": "x",
            "script": [{"action": "ADD_TO_VARIABLE", "parameters": ["gold", 1.5]}]}}}"#;
        let story = Story::from_json(json).unwrap();
        let params = &story.section(&SectionId::from(1)).unwrap().script()[0].parameters;
        assert_eq!(params[1].as_text(), "1.5");

        let again: serde_json::Value = serde_json::from_str(&story.to_json().unwrap()).unwrap();
        assert_eq!(again["sections"]["1"]["script"][0]["parameters"][1], 1.5);
    }

    #[test]
    fn fractional_section_ids_are_rejected() {
        let json = r#"{"sections": {"1": {"text": "x", "next": [{"text": "on", "next": 2.5}]}}}"#;
        assert!(matches!(Story::from_json(json), Err(StoryError::Json(_))));
    }

    proptest::proptest! {
        #[test]
        fn round_trip_preserves_generated_stories(
            texts in proptest::collection::vec("[a-z ]{0,12}", 1..6),
            links in proptest::collection::vec((0usize..6, 0usize..6, "[a-z]{0,4}"), 0..10),
            vars in proptest::collection::btree_map("[a-z]{1,4}", "[0-9a-z]{0,3}", 0..4),
        ) {
            let mut story = Story::new("generated");
            for (i, text) in texts.iter().enumerate() {
                story.sections.insert(SectionId::from(i as i64), Section::new(text.clone()));
            }
            for (from, to, text) in &links {
                let from = SectionId::from((*from % texts.len()) as i64);
                story.add_choice(&from, *to as i64, text.clone()).unwrap();
            }
            for (name, value) in &vars {
                story.variables_mut().set(name.clone(), value.clone());
            }

            let again = Story::from_json(&story.to_json().unwrap()).unwrap();
            proptest::prop_assert_eq!(again, story);
        }
    }
}
