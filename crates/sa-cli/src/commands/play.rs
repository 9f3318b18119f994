//! Line-oriented story player.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;

use sa_play::{PlayConfig, PlayError, PlaySession, SaveGame, Scene};
use sa_script::InputProvider;

/// Answers `INPUT` actions from stdin.
struct StdinInput;

impl InputProvider for StdinInput {
    fn request(&mut self, _variable: &str, prompt: &str) -> Option<String> {
        print!("{} ", prompt.bold());
        io::stdout().flush().ok()?;
        read_line().ok().flatten()
    }
}

/// One line from stdin without its line ending. `None` at end of input.
fn read_line() -> Result<Option<String>, String> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
        Err(e) => Err(e.to_string()),
    }
}

pub fn run(path: &Path, save: Option<&Path>) -> Result<(), String> {
    let story = super::load_story(path)?;
    let save_path = save
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(SaveGame::file_name(&story)));
    let title = story.title().unwrap_or("untitled").to_string();

    let mut session = PlaySession::new(story, PlayConfig::default()).with_input(StdinInput);
    let scene = session.start().map_err(|e| e.to_string())?;

    println!("  {} {title}", "Playing".bold());
    println!("  Pick a choice by number. Enter or 'n' continues, 'b' goes back,");
    println!("  's' saves, 'l' loads, 'q' quits.");
    show(&scene);

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = read_line()? else {
            break;
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        match step(&mut session, input, &save_path) {
            Ok(Some(scene)) => show(&scene),
            Ok(None) => {}
            Err(e) => println!("{}\n", e.yellow()),
        }
    }

    Ok(())
}

fn step(session: &mut PlaySession, input: &str, save_path: &Path) -> Result<Option<Scene>, String> {
    match input {
        "" | "n" => session
            .forward_if_single_choice()
            .map_err(|e| e.to_string())?
            .map(Some)
            .ok_or_else(|| "pick a choice by number".to_string()),
        "b" => session
            .back()
            .map_err(|e| e.to_string())?
            .map(Some)
            .ok_or_else(|| "nothing to go back to".to_string()),
        "s" => {
            let json = session.save_game().to_json().map_err(|e| e.to_string())?;
            fs::write(save_path, json)
                .map_err(|e| format!("cannot write '{}': {e}", save_path.display()))?;
            println!("  Saved to {}\n", save_path.display());
            Ok(None)
        }
        "l" => {
            let json = fs::read_to_string(save_path)
                .map_err(|e| format!("cannot read '{}': {e}", save_path.display()))?;
            let save = SaveGame::from_json(&json).map_err(|e| e.to_string())?;
            session.restore_game(save).map(Some).map_err(|e| e.to_string())
        }
        _ => {
            let number: usize = input
                .parse()
                .map_err(|_| format!("unknown command '{input}'"))?;
            let index = number
                .checked_sub(1)
                .ok_or_else(|| "choices start at 1".to_string())?;
            match session.choose(index) {
                Ok(scene) => Ok(Some(scene)),
                Err(PlayError::InvalidChoice { available, .. }) => Err(format!(
                    "there is no choice {number} (pick 1 to {available})"
                )),
                Err(e) => Err(e.to_string()),
            }
        }
    }
}

fn show(scene: &Scene) {
    println!();
    for err in &scene.script_errors {
        eprintln!("  {} {err}", "script:".yellow());
    }
    println!("{}", scene.text);
    if let Some(media) = &scene.media {
        println!("{}", format!("[{}: {}]", media.kind, media.src).dimmed());
    }
    println!();

    if scene.is_ending() {
        println!("  {}\n", "The End".bold());
        return;
    }
    for choice in &scene.choices {
        let label = if choice.auto_advance {
            "continue".italic().to_string()
        } else {
            choice.text.clone()
        };
        println!("  {} {label}", format!("{}.", choice.index + 1).cyan());
    }
    println!();
}
