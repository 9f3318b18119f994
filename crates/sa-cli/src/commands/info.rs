use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path) -> Result<(), String> {
    let story = super::load_story(path)?;

    println!("  {}", story.title().unwrap_or("untitled"));
    println!(
        "  {} sections, {} choices, {} roots, {} endings",
        story.section_count(),
        story.choice_count(),
        story.roots().len(),
        story.leaves().len()
    );

    if story.sections.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Kind", "Choices", "Script", "Text"]);

    for (id, section) in &story.sections {
        let kind = match (story.is_root(id), section.is_leaf()) {
            (true, true) => "root, end",
            (true, false) => "root",
            (false, true) => "end",
            (false, false) => "",
        };
        let text = section.raw_text().replace('\n', " ");
        let text = if text.chars().count() > 50 {
            format!("{}...", text.chars().take(47).collect::<String>())
        } else {
            text
        };
        table.add_row(vec![
            id.to_string(),
            kind.to_string(),
            section.choices().len().to_string(),
            section.script().len().to_string(),
            text,
        ]);
    }

    println!("{table}");
    Ok(())
}
