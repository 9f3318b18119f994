//! Executing actions against a story.

use sa_core::{Choice, ScriptEntry, Section, SectionId, Story};

use crate::action::Action;
use crate::error::{ScriptError, ScriptResult};
use crate::value::{self, compare};

/// Supplies values for `INPUT` actions.
pub trait InputProvider {
    /// Ask for a value for `variable`, showing `prompt`. Returning `None`
    /// stores the prompt text itself, exactly like `SET`.
    fn request(&mut self, variable: &str, prompt: &str) -> Option<String>;
}

/// An input provider that never answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputProvider for NoInput {
    fn request(&mut self, _variable: &str, _prompt: &str) -> Option<String> {
        None
    }
}

impl<F> InputProvider for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn request(&mut self, variable: &str, prompt: &str) -> Option<String> {
        self(variable, prompt)
    }
}

/// What a successfully executed action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action took effect.
    Applied,
    /// A condition was false or there was nothing to act on.
    Skipped,
    /// An identical choice already existed, so none was added.
    DuplicateChoiceIgnored,
}

/// Result of every action in a script, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptReport {
    /// One result per entry.
    pub results: Vec<ScriptResult<Outcome>>,
}

impl ScriptReport {
    /// The failures, in script order.
    pub fn errors(&self) -> impl Iterator<Item = &ScriptError> {
        self.results.iter().filter_map(|r| r.as_ref().err())
    }

    /// Consume the report, keeping only the failures.
    pub fn into_errors(self) -> Vec<ScriptError> {
        self.results.into_iter().filter_map(Result::err).collect()
    }

    /// True when no action failed.
    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Number of actions that took effect.
    pub fn applied(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, Ok(Outcome::Applied)))
            .count()
    }
}

/// Runs actions against a story, asking `input` for `INPUT` values.
pub struct Interpreter<'a> {
    input: &'a mut dyn InputProvider,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter that asks `input` for `INPUT` values.
    pub fn new(input: &'a mut dyn InputProvider) -> Self {
        Self { input }
    }

    /// Execute one action.
    pub fn execute(&mut self, action: &Action, story: &mut Story) -> ScriptResult<Outcome> {
        match action {
            Action::None => Ok(Outcome::Applied),
            Action::Set { variable, value } => {
                story.variables_mut().set(variable.as_str(), value.as_str());
                Ok(Outcome::Applied)
            }
            Action::Input { variable, prompt } => {
                let value = self
                    .input
                    .request(variable, prompt)
                    .unwrap_or_else(|| prompt.clone());
                story.variables_mut().set(variable.as_str(), value);
                Ok(Outcome::Applied)
            }
            Action::AddToVariable { variable, amount } => {
                let current = story.variables().and_then(|v| v.get(variable));
                let sum = value::add(current, amount);
                story.variables_mut().set(variable.as_str(), sum);
                Ok(Outcome::Applied)
            }
            Action::CompareDo {
                variable,
                op,
                value,
                then,
            } => {
                let Some(current) = set_value(story, variable) else {
                    tracing::debug!(%variable, "COMPARE_DO variable not set");
                    return Ok(Outcome::Skipped);
                };
                if compare(&current, *op, value) {
                    self.chain(then, story)
                } else {
                    Ok(Outcome::Skipped)
                }
            }
            Action::IfSetDo { variable, then } => {
                if is_set(story, variable) {
                    self.chain(then, story)
                } else {
                    Ok(Outcome::Skipped)
                }
            }
            Action::IfNotSetDo { variable, then } => {
                if is_set(story, variable) {
                    Ok(Outcome::Skipped)
                } else {
                    self.chain(then, story)
                }
            }
            Action::AddChoice { target, text } => add_choice(story, target, text),
            Action::RemoveChoice { target } => remove_choice(story, target),
            Action::IfSetAddChoice {
                variable,
                target,
                text,
            } => {
                if is_set(story, variable) {
                    add_choice(story, target, text)
                } else {
                    Ok(Outcome::Skipped)
                }
            }
            Action::IfSetRemoveChoice { variable, target } => {
                if is_set(story, variable) {
                    remove_choice(story, target)
                } else {
                    Ok(Outcome::Skipped)
                }
            }
        }
    }

    fn chain(&mut self, then: &Action, story: &mut Story) -> ScriptResult<Outcome> {
        tracing::debug!(action = %then.kind(), "chaining to action");
        self.execute(then, story)
    }

    /// Parse and execute one document entry.
    pub fn run_entry(&mut self, entry: &ScriptEntry, story: &mut Story) -> ScriptResult<Outcome> {
        let action = Action::parse(entry)?;
        self.execute(&action, story)
    }

    /// Run every entry in order. A failing entry is logged and recorded in
    /// the report; the entries after it still run.
    pub fn run_script(&mut self, script: &[ScriptEntry], story: &mut Story) -> ScriptReport {
        let mut report = ScriptReport::default();
        for (index, entry) in script.iter().enumerate() {
            let result = self.run_entry(entry, story);
            if let Err(err) = &result {
                tracing::warn!(index, action = %entry.action, error = %err, "script action failed");
            }
            report.results.push(result);
        }
        report
    }

    /// Run the entry script of section `id`.
    pub fn run_section(&mut self, id: &SectionId, story: &mut Story) -> ScriptResult<ScriptReport> {
        let script = story
            .section(id)
            .ok_or_else(|| ScriptError::MissingSection(id.clone()))?
            .script()
            .to_vec();
        Ok(self.run_script(&script, story))
    }
}

/// Execute one action without an input provider.
pub fn execute(action: &Action, story: &mut Story) -> ScriptResult<Outcome> {
    Interpreter::new(&mut NoInput).execute(action, story)
}

/// Run the entry script of section `id` without an input provider.
pub fn run_script(story: &mut Story, id: &SectionId) -> ScriptResult<ScriptReport> {
    Interpreter::new(&mut NoInput).run_section(id, story)
}

/// Parse every entry without running anything, returning the failures by
/// position.
pub fn validate_script(script: &[ScriptEntry]) -> Vec<(usize, ScriptError)> {
    script
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| Action::parse(entry).err().map(|e| (i, e)))
        .collect()
}

fn is_set(story: &Story, variable: &str) -> bool {
    story.variables().is_some_and(|v| v.is_set(variable))
}

fn set_value(story: &Story, variable: &str) -> Option<String> {
    story
        .variables()
        .and_then(|v| v.get(variable))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The section play state points at. `None` when nothing is current.
fn current_section(story: &mut Story) -> ScriptResult<Option<&mut Section>> {
    let Some(id) = story.current_section_id().cloned() else {
        return Ok(None);
    };
    match story.section_mut(&id) {
        Some(section) => Ok(Some(section)),
        None => Err(ScriptError::MissingSection(id)),
    }
}

fn add_choice(story: &mut Story, target: &SectionId, text: &str) -> ScriptResult<Outcome> {
    let Some(section) = current_section(story)? else {
        tracing::debug!(%target, "no current section to add a choice to");
        return Ok(Outcome::Skipped);
    };
    let choices = section.choices_mut();
    if choices.iter().any(|c| c.is_same(target, text)) {
        tracing::debug!(%target, text, "choice already exists");
        return Ok(Outcome::DuplicateChoiceIgnored);
    }
    choices.push(Choice::new(target.clone(), text));
    Ok(Outcome::Applied)
}

fn remove_choice(story: &mut Story, target: &SectionId) -> ScriptResult<Outcome> {
    let Some(section) = current_section(story)? else {
        tracing::debug!(%target, "no current section to remove a choice from");
        return Ok(Outcome::Skipped);
    };
    match section.choices().iter().position(|c| &c.next == target) {
        Some(index) => {
            let removed = section.choices_mut().remove(index);
            tracing::debug!(%target, text = %removed.text, index, "choice removed");
            Ok(Outcome::Applied)
        }
        None => Ok(Outcome::Skipped),
    }
}
