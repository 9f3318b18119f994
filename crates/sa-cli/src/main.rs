//! CLI frontend for Story Adventure: play, inspect, flatten and edit
//! branching stories.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sa",
    about = "Story Adventure: play and author branching stories",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log interpreter and playback details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scripts and choice targets of a story
    Check {
        /// Story document (.json)
        story: PathBuf,
    },

    /// Show a summary of a story's sections
    Info {
        /// Story document (.json)
        story: PathBuf,
    },

    /// Play a story in the terminal
    Play {
        /// Story document (.json)
        story: PathBuf,

        /// Save file for the `s` and `l` commands (default: `<title>_save.json`)
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Write one route through the story as Markdown
    Linearize {
        /// Story document (.json)
        story: PathBuf,

        /// Section to start at
        #[arg(long)]
        from: String,

        /// Section to end at
        #[arg(long)]
        to: String,

        /// Sections the route must pass through
        #[arg(long)]
        through: Vec<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out media references
        #[arg(long)]
        no_media: bool,
    },

    /// Add, remove or edit sections
    Section {
        #[command(subcommand)]
        action: SectionCommand,
    },

    /// Add or remove choices
    Choice {
        #[command(subcommand)]
        action: ChoiceCommand,
    },
}

#[derive(Subcommand)]
enum SectionCommand {
    /// Add a section under the next free number
    Add {
        /// Story document (.json)
        story: PathBuf,

        /// Initial text
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Remove a section and every choice leading to it
    Remove {
        /// Story document (.json)
        story: PathBuf,

        /// Section id
        id: String,
    },

    /// Replace a section's text
    Text {
        /// Story document (.json)
        story: PathBuf,

        /// Section id
        id: String,

        /// New text (`\n` separates lines)
        text: String,
    },

    /// Set or clear a section's image
    Media {
        /// Story document (.json)
        story: PathBuf,

        /// Section id
        id: String,

        /// Image source; omit to remove the media
        src: Option<String>,
    },
}

#[derive(Subcommand)]
enum ChoiceCommand {
    /// Add a choice from one section to another
    Add {
        /// Story document (.json)
        story: PathBuf,

        /// Section the choice is shown on
        from: String,

        /// Section the choice leads to
        to: String,

        /// Choice text (empty for a plain continue)
        #[arg(short, long, default_value = "")]
        text: String,
    },

    /// Remove the choice at a position (starting at 0)
    Remove {
        /// Story document (.json)
        story: PathBuf,

        /// Section the choice is shown on
        from: String,

        /// Choice position
        index: usize,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { story } => commands::check::run(&story),
        Commands::Info { story } => commands::info::run(&story),
        Commands::Play { story, save } => commands::play::run(&story, save.as_deref()),
        Commands::Linearize {
            story,
            from,
            to,
            through,
            output,
            no_media,
        } => commands::linearize::run(&story, &from, &to, &through, output.as_deref(), no_media),
        Commands::Section { action } => match action {
            SectionCommand::Add { story, text } => {
                commands::section::add(&story, text.as_deref())
            }
            SectionCommand::Remove { story, id } => commands::section::remove(&story, &id),
            SectionCommand::Text { story, id, text } => {
                commands::section::text(&story, &id, &text)
            }
            SectionCommand::Media { story, id, src } => {
                commands::section::media(&story, &id, src.as_deref())
            }
        },
        Commands::Choice { action } => match action {
            ChoiceCommand::Add {
                story,
                from,
                to,
                text,
            } => commands::choice::add(&story, &from, &to, &text),
            ChoiceCommand::Remove { story, from, index } => {
                commands::choice::remove(&story, &from, index)
            }
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
