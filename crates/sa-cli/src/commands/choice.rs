use std::path::Path;

pub fn add(path: &Path, from: &str, to: &str, text: &str) -> Result<(), String> {
    let mut story = super::load_story(path)?;
    let from = super::parse_id(from);
    let to = super::parse_id(to);
    if !story.contains_section(&to) {
        tracing::warn!(%to, "choice leads to a section that does not exist yet");
    }
    let index = story
        .add_choice(&from, to.clone(), text)
        .map_err(|e| e.to_string())?;
    super::write_story(path, &story)?;
    println!("  Added choice {index} on section {from} leading to {to}");
    Ok(())
}

pub fn remove(path: &Path, from: &str, index: usize) -> Result<(), String> {
    let mut story = super::load_story(path)?;
    let from = super::parse_id(from);
    let removed = story
        .remove_choice(&from, index)
        .map_err(|e| e.to_string())?;
    super::write_story(path, &story)?;
    println!(
        "  Removed choice {index} on section {from} (to {})",
        removed.next
    );
    Ok(())
}
