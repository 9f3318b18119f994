//! Rendering a route as one piece of Markdown text.

use sa_core::{SectionId, Story};

use crate::config::PlayConfig;

/// Render the sections of `path` in order.
///
/// Each section contributes its text followed by a blank line, then
/// `![](src)` and another blank line when it has media with a source. Ids
/// missing from the story contribute empty text.
pub fn linearize(story: &Story, path: &[SectionId], config: &PlayConfig) -> String {
    let mut out = String::new();
    for id in path {
        let Some(section) = story.section(id) else {
            tracing::debug!(%id, "linearizing missing section as empty text");
            out.push_str("\n\n");
            continue;
        };
        let raw = section.raw_text();
        let text = if config.substitute_variables {
            story.substitute(&raw)
        } else {
            raw
        };
        out.push_str(&text);
        out.push_str("\n\n");
        if config.include_media
            && let Some(media) = section.media.as_ref().filter(|m| m.has_src())
        {
            out.push_str(&format!("![]({})\n\n", media.src));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sa_core::{Media, Section};

    use crate::search::find_path;

    fn story() -> Story {
        let mut story = Story::new("Cave")
            .with_section(
                1,
                Section::new("Hello ${name}.")
                    .with_choice(2, "In")
                    .with_choice(3, "Out"),
            )
            .with_section(
                2,
                Section::from_lines(["It is dark.", "Something moves."])
                    .with_media(Media::image("cave.png"))
                    .with_choice(3, ""),
            )
            .with_section(3, Section::new("The end."));
        story.variables_mut().set("name", "Ada");
        story
    }

    #[test]
    fn renders_route() {
        let story = story();
        let path = find_path(&story, &SectionId::from(1), &SectionId::from(3), &[SectionId::from(2)])
            .unwrap();
        let text = linearize(&story, &path, &PlayConfig::default());
        insta::assert_snapshot!(text.trim_end(), @r"
        Hello Ada.

        It is dark.
        Something moves.

        ![](cave.png)

        The end.
        ");
    }

    #[test]
    fn media_and_substitution_can_be_turned_off() {
        let story = story();
        let path = [SectionId::from(1), SectionId::from(2)];
        let config = PlayConfig::default().with_media(false).with_substitution(false);
        assert_eq!(
            linearize(&story, &path, &config),
            "Hello ${name}.\n\nIt is dark.\nSomething moves.\n\n"
        );
    }

    #[test]
    fn missing_sections_render_empty() {
        let story = story();
        let path = [SectionId::from(3), SectionId::from(99)];
        assert_eq!(linearize(&story, &path, &PlayConfig::default()), "The end.\n\n\n\n");
        assert_eq!(linearize(&story, &[], &PlayConfig::default()), "");
    }
}
