//! Interactive playback.
//!
//! `PlaySession` owns the story being read. Entering a section runs its
//! script through the interpreter, then renders the section with the
//! variables the script may just have changed. A failed transition never
//! moves the session: it stays on the last section it could show.

use sa_core::{PlayState, Section, SectionId, Story};
use sa_script::{InputProvider, Interpreter, NoInput};

use crate::config::PlayConfig;
use crate::error::{PlayError, PlayResult};
use crate::save::SaveGame;
use crate::scene::Scene;

/// Externally visible playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Nothing is being played.
    Menu,
    /// A section is current.
    Playing,
}

/// A reader's session with one story.
pub struct PlaySession {
    story: Story,
    config: PlayConfig,
    mode: Mode,
    input: Box<dyn InputProvider>,
}

impl PlaySession {
    /// Create a session in [`Mode::Menu`]. Call [`start`](Self::start) to
    /// begin playing.
    pub fn new(story: Story, config: PlayConfig) -> Self {
        Self {
            story,
            config,
            mode: Mode::Menu,
            input: Box::new(NoInput),
        }
    }

    /// Use `input` to answer `INPUT` actions.
    pub fn with_input(mut self, input: impl InputProvider + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Get the story, including its play state.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Consume the session and return the story.
    pub fn into_story(self) -> Story {
        self.story
    }

    /// Get the configuration.
    pub fn config(&self) -> &PlayConfig {
        &self.config
    }

    /// Get the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The section being shown, if playing.
    pub fn current_section_id(&self) -> Option<&SectionId> {
        match self.mode {
            Mode::Playing => self.story.current_section_id(),
            Mode::Menu => None,
        }
    }

    /// The undo history, most recent last.
    pub fn history(&self) -> &[SectionId] {
        self.story
            .state
            .as_ref()
            .map(|s| s.history.as_slice())
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Start or resume playback.
    ///
    /// Resumes at the play state's current section when it names an existing
    /// section, otherwise begins at the first section. The section is entered
    /// without touching the history, so its script runs again.
    pub fn start(&mut self) -> PlayResult<Scene> {
        let Some(first) = self.story.first_section_id().cloned() else {
            self.mode = Mode::Menu;
            return Err(PlayError::EmptyStory);
        };
        let resume = self
            .story
            .current_section_id()
            .filter(|id| self.story.contains_section(id))
            .cloned();
        let id = match resume {
            Some(id) => id,
            None => {
                tracing::debug!(%first, "starting at first section");
                first
            }
        };
        self.transition(&id, false)
    }

    /// Replace the story and start playing it. A story without sections
    /// leaves the session in [`Mode::Menu`].
    pub fn load(&mut self, story: Story) -> PlayResult<Scene> {
        self.story = story;
        self.mode = Mode::Menu;
        self.start()
    }

    /// Enter section `id`, recording the current section in the history.
    pub fn enter(&mut self, id: &SectionId) -> PlayResult<Scene> {
        self.transition(id, true)
    }

    /// Go back to the most recent section in the history. Returns `None`
    /// when the history is empty.
    pub fn back(&mut self) -> PlayResult<Option<Scene>> {
        if self.current_section_id().is_none() {
            return Err(PlayError::NotPlaying);
        }
        let Some(previous) = self.story.state.as_mut().and_then(PlayState::pop_history) else {
            return Ok(None);
        };
        match self.transition(&previous, false) {
            Ok(scene) => Ok(Some(scene)),
            Err(err) => {
                // restore the entry so a failed undo changes nothing
                self.story.state_mut().history.push(previous);
                Err(err)
            }
        }
    }

    /// Follow the current section's choice at `index`.
    pub fn choose(&mut self, index: usize) -> PlayResult<Scene> {
        let section = self.current_section()?;
        let available = section.choices().len();
        let target = section
            .choices()
            .get(index)
            .map(|c| c.next.clone())
            .ok_or(PlayError::InvalidChoice { index, available })?;
        self.enter(&target)
    }

    /// Follow the current section's choice when it has exactly one. Returns
    /// `None` otherwise.
    pub fn forward_if_single_choice(&mut self) -> PlayResult<Option<Scene>> {
        if self.current_section()?.choices().len() != 1 {
            return Ok(None);
        }
        self.choose(0).map(Some)
    }

    /// Render the current section again without running its script.
    pub fn scene(&self) -> PlayResult<Scene> {
        let id = self.current_section_id().ok_or(PlayError::NotPlaying)?;
        let section = self
            .story
            .section(id)
            .ok_or_else(|| PlayError::MissingSection(id.clone()))?;
        Ok(Scene::render(&self.story, id, section))
    }

    fn current_section(&self) -> PlayResult<&Section> {
        let id = self.current_section_id().ok_or(PlayError::NotPlaying)?;
        self.story
            .section(id)
            .ok_or_else(|| PlayError::MissingSection(id.clone()))
    }

    fn transition(&mut self, id: &SectionId, push: bool) -> PlayResult<Scene> {
        if !self.story.contains_section(id) {
            tracing::warn!(%id, "cannot enter missing section");
            return Err(PlayError::MissingSection(id.clone()));
        }

        let limit = self.config.history_limit;
        let state = self.story.state_mut();
        if push && let Some(previous) = state.current_section.take() {
            state.push_history(previous, limit);
        }
        state.current_section = Some(id.clone());
        self.mode = Mode::Playing;
        tracing::debug!(%id, push, "entering section");

        let report = Interpreter::new(self.input.as_mut()).run_section(id, &mut self.story)?;
        let section = self
            .story
            .section(id)
            .ok_or_else(|| PlayError::MissingSection(id.clone()))?;
        let mut scene = Scene::render(&self.story, id, section);
        scene.script_errors = report.into_errors();
        Ok(scene)
    }

    // -----------------------------------------------------------------------
    // Saves
    // -----------------------------------------------------------------------

    /// Capture the current progress.
    pub fn save_game(&self) -> SaveGame {
        SaveGame::capture(&self.story)
    }

    /// Replace the play state with a save's and resume from it.
    ///
    /// The save must carry the same title as the loaded story.
    pub fn restore_game(&mut self, save: SaveGame) -> PlayResult<Scene> {
        let Some(title) = self.story.title() else {
            return Err(PlayError::NoStoryLoaded);
        };
        if save.meta.title.as_deref() != Some(title) {
            return Err(PlayError::TitleMismatch {
                story: title.to_string(),
                save: save.meta.title.unwrap_or_default(),
            });
        }
        let previous = self.story.state.replace(save.state);
        match self.start() {
            Ok(scene) => Ok(scene),
            Err(err) => {
                self.story.state = previous;
                Err(err)
            }
        }
    }
}
