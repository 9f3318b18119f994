pub mod check;
pub mod choice;
pub mod info;
pub mod linearize;
pub mod play;
pub mod section;

use std::fs;
use std::path::Path;

use sa_core::{Scalar, SectionId, Story};

/// Read and parse a story document.
fn load_story(path: &Path) -> Result<Story, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    Story::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

/// Write a story document back to disk.
fn write_story(path: &Path, story: &Story) -> Result<(), String> {
    let json = story.to_json().map_err(|e| e.to_string())?;
    fs::write(path, json + "\n").map_err(|e| format!("cannot write '{}': {e}", path.display()))
}

/// Read a section id typed on the command line. Numbers become numeric ids.
fn parse_id(text: &str) -> SectionId {
    match text.parse::<i64>() {
        Ok(n) if n.to_string() == text => SectionId::from(Scalar::Int(n)),
        _ => SectionId::from(text),
    }
}
