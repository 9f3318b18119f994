use serde::{Deserialize, Serialize};

use crate::id::{Scalar, SectionId};

/// A node in the story graph: a screen of text, optional media, the choices
/// leading away from it and the script run when it is entered.
///
/// The per-section `id` some tools write next to these fields is ignored on
/// load. The key a section is stored under in [`Story`](crate::Story) is its
/// identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Single-string text. Ignored when `text_lines` is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Text as separate lines, joined with `\n` before use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_lines: Option<Vec<String>>,
    /// Optional media reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    /// Outgoing choices, in display order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Vec<Choice>>,
    /// Actions run whenever the section becomes current.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Vec<ScriptEntry>>,
}

impl Section {
    /// Create a section holding a single string of text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Create a section from separate lines of text.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text_lines: Some(lines.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, target: impl Into<SectionId>, text: impl Into<String>) -> Self {
        self.choices_mut().push(Choice::new(target, text));
        self
    }

    /// Add a script entry.
    pub fn with_action(mut self, entry: ScriptEntry) -> Self {
        self.script.get_or_insert_with(Vec::new).push(entry);
        self
    }

    /// Set the media reference.
    pub fn with_media(mut self, media: Media) -> Self {
        self.media = Some(media);
        self
    }

    /// The raw (unsubstituted) text: joined lines if present, else the
    /// single string, else empty.
    pub fn raw_text(&self) -> String {
        match (&self.text_lines, &self.text) {
            (Some(lines), _) => lines.join("\n"),
            (None, Some(text)) => text.clone(),
            (None, None) => String::new(),
        }
    }

    /// Outgoing choices, empty for a leaf.
    pub fn choices(&self) -> &[Choice] {
        self.next.as_deref().unwrap_or_default()
    }

    /// Mutable outgoing choices, created on first use.
    pub fn choices_mut(&mut self) -> &mut Vec<Choice> {
        self.next.get_or_insert_with(Vec::new)
    }

    /// The entry script, empty when there is none.
    pub fn script(&self) -> &[ScriptEntry] {
        self.script.as_deref().unwrap_or_default()
    }

    /// True when no choice leads away from this section.
    pub fn is_leaf(&self) -> bool {
        self.choices().is_empty()
    }
}

/// A labelled edge from one section to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Display text. Empty means "no explicit choice", shown as a plain
    /// continue control.
    #[serde(default)]
    pub text: String,
    /// Target section.
    pub next: SectionId,
}

impl Choice {
    /// Create a choice leading to `target`.
    pub fn new(target: impl Into<SectionId>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next: target.into(),
        }
    }

    /// True when the choice has no text of its own.
    pub fn is_auto_advance(&self) -> bool {
        self.text.is_empty()
    }

    /// Duplicate check used when scripts add choices: same target, same text.
    pub fn is_same(&self, target: &SectionId, text: &str) -> bool {
        &self.next == target && self.text == text
    }
}

/// A reference to an image or other asset shown with a section.
///
/// `src` is opaque: a URL, a path or a data URL. Resolving it is the
/// caller's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Media type, usually `image`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Where the asset lives.
    #[serde(default)]
    pub src: String,
}

impl Media {
    /// An image reference.
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            kind: "image".to_string(),
            src: src.into(),
        }
    }

    /// True for image media.
    pub fn is_image(&self) -> bool {
        self.kind == "image"
    }

    /// True when there is a source to show.
    pub fn has_src(&self) -> bool {
        !self.src.is_empty()
    }
}

/// One script step as it appears in the document: an action name and its
/// positional parameters. `sa-script` turns these into typed actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Action name from the catalog.
    pub action: String,
    /// Positional parameters, nested actions inline.
    #[serde(default)]
    pub parameters: Vec<Scalar>,
}

impl ScriptEntry {
    /// Create an entry from a name and parameters.
    pub fn new<I, P>(action: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Scalar>,
    {
        Self {
            action: action.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_win_over_text() {
        let mut section = Section::new("single");
        assert_eq!(section.raw_text(), "single");

        section.text_lines = Some(vec!["one".into(), "two".into()]);
        assert_eq!(section.raw_text(), "one\ntwo");

        assert_eq!(Section::default().raw_text(), "");
    }

    #[test]
    fn builder_adds_choices_and_script() {
        let section = Section::from_lines(["It is dark."])
            .with_choice(2, "Light a torch")
            .with_choice("cellar", "")
            .with_action(ScriptEntry::new("SET", ["torch", "lit"]));

        assert_eq!(section.choices().len(), 2);
        assert!(section.choices()[1].is_auto_advance());
        assert_eq!(section.script()[0].action, "SET");
        assert!(!section.is_leaf());
        assert!(Section::new("end").is_leaf());
    }

    #[test]
    fn choice_dedup_key() {
        let choice = Choice::new(4, "Run");
        assert!(choice.is_same(&SectionId::from("4"), "Run"));
        assert!(!choice.is_same(&SectionId::from(4), "run"));
    }

    #[test]
    fn parses_wire_shape() {
        let section: Section = serde_json::from_str(
            r#"{
                "id": 7,
                "text_lines": ["Hello ${name}"],
                "media": {"type": "image", "src": "cave.png"},
                "next": [{"text": "On", "next": 8}],
                "script": [{"action": "ADD_TO_VARIABLE", "parameters": ["gold", 5]}]
            }"#,
        )
        .unwrap();

        assert!(section.media.as_ref().is_some_and(Media::is_image));
        assert_eq!(section.choices()[0].next, SectionId::from(8));
        assert_eq!(section.script()[0].parameters[1], Scalar::Int(5));

        let json = serde_json::to_value(&section).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("text").is_none());
    }
}
