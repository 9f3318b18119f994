use std::path::Path;

use colored::Colorize;

use sa_script::action::expected_types;
use sa_script::validate_script;

pub fn run(path: &Path) -> Result<(), String> {
    let story = super::load_story(path)?;
    let mut problems = 0;

    for (id, section) in &story.sections {
        let script = section.script();
        for (index, err) in validate_script(script) {
            eprintln!("  {} section {id}, action {index}: {err}", "error:".red());
            let expected: Vec<_> = expected_types(&script[index])
                .iter()
                .map(ToString::to_string)
                .collect();
            if !expected.is_empty() {
                eprintln!("    expected: {} {}", script[index].action, expected.join(" "));
            }
            problems += 1;
        }
    }

    for (owner, index, target) in story.dangling_choices() {
        eprintln!(
            "  {} section {owner}, choice {index} leads to missing section {target}",
            "error:".red()
        );
        problems += 1;
    }

    if problems > 0 {
        return Err(format!(
            "{problems} problem{} found",
            if problems == 1 { "" } else { "s" }
        ));
    }

    println!(
        "  All checks passed for '{}'.",
        story.title().unwrap_or("untitled")
    );
    println!(
        "  {} sections, {} choices",
        story.section_count(),
        story.choice_count()
    );
    Ok(())
}
