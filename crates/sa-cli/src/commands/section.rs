use std::path::Path;

use sa_core::Media;

pub fn add(path: &Path, text: Option<&str>) -> Result<(), String> {
    let mut story = super::load_story(path)?;
    let id = story.add_section().map_err(|e| e.to_string())?;
    if let Some(text) = text {
        story.set_text(&id, text).map_err(|e| e.to_string())?;
    }
    super::write_story(path, &story)?;
    println!("  Added section {id}");
    Ok(())
}

pub fn remove(path: &Path, id: &str) -> Result<(), String> {
    let mut story = super::load_story(path)?;
    let id = super::parse_id(id);
    let before = story.choice_count();
    story.remove_section(&id).map_err(|e| e.to_string())?;
    let dropped = before - story.choice_count();
    super::write_story(path, &story)?;
    println!("  Removed section {id} and {dropped} choice(s) leading to it");
    Ok(())
}

pub fn text(path: &Path, id: &str, text: &str) -> Result<(), String> {
    let mut story = super::load_story(path)?;
    let id = super::parse_id(id);
    story
        .set_text(&id, &text.replace("\\n", "\n"))
        .map_err(|e| e.to_string())?;
    super::write_story(path, &story)?;
    println!("  Updated text of section {id}");
    Ok(())
}

pub fn media(path: &Path, id: &str, src: Option<&str>) -> Result<(), String> {
    let mut story = super::load_story(path)?;
    let id = super::parse_id(id);
    match src {
        Some(src) => {
            story
                .set_media(&id, Media::image(src))
                .map_err(|e| e.to_string())?;
            println!("  Section {id} now shows {src}");
        }
        None => {
            let removed = story.clear_media(&id).map_err(|e| e.to_string())?;
            match removed {
                Some(media) => println!("  Removed {} from section {id}", media.src),
                None => println!("  Section {id} had no media"),
            }
        }
    }
    super::write_story(path, &story)
}
