use std::fs;
use std::path::Path;

use sa_play::{PathSearch, PlayConfig, linearize};

pub fn run(
    path: &Path,
    from: &str,
    to: &str,
    through: &[String],
    output: Option<&Path>,
    no_media: bool,
) -> Result<(), String> {
    let story = super::load_story(path)?;
    let start = super::parse_id(from);
    let end = super::parse_id(to);
    let waypoints: Vec<_> = through.iter().map(|t| super::parse_id(t)).collect();

    let mut search = PathSearch::new(&story);
    let route = search.find(&start, &end, &waypoints);
    tracing::debug!(stats = ?search.stats(), "search finished");
    let Some(route) = route else {
        return Err(format!(
            "no linear story from {start} to {end} through all requested sections"
        ));
    };

    let config = PlayConfig::default().with_media(!no_media);
    let text = linearize(&story, &route, &config);

    match output {
        Some(out) => {
            fs::write(out, &text).map_err(|e| format!("cannot write '{}': {e}", out.display()))?;
            println!("  Wrote {} sections to {}", route.len(), out.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
