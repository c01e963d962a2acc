//! Interactive questions
//!
//! The three questions (project name, language, framework) go through the
//! [`Prompter`] trait so the flow can be driven without a terminal.

use std::io;

use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::error::{Result, ScaffoldError};
use crate::templates::{Framework, Language};

/// Used when neither the command line nor config supplies a usable name
pub const FALLBACK_PROJECT_NAME: &str = "c-t-project";

/// A source of answers
///
/// Both methods return `Ok(None)` when the user cancels.
pub trait Prompter {
    /// Free-text question with a pre-filled default
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn text(&mut self, message: &str, default: &str) -> Result<Option<String>>;

    /// Single choice; returns the index of the chosen item
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn select(&mut self, message: &str, items: &[&str]) -> Result<Option<usize>>;
}

/// Terminal prompts backed by `dialoguer`
///
/// Esc or Ctrl+C cancels.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    /// Create a prompter using the colorful theme
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, message: &str, default: &str) -> Result<Option<String>> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .default(default.to_string())
            .interact_text();
        cancelled_as_none(answer)
    }

    fn select(&mut self, message: &str, items: &[&str]) -> Result<Option<usize>> {
        let answer = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt();
        cancelled_as_none(answer).map(Option::flatten)
    }
}

/// Ctrl+C surfaces from the terminal as an interrupted read
fn cancelled_as_none<T>(answer: std::result::Result<T, dialoguer::Error>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(dialoguer::Error::IO(err)) => Err(ScaffoldError::Prompt(err)),
    }
}

/// Answers gathered from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Trimmed, non-empty project name
    pub project_name: String,
    /// Chosen language
    pub language: Language,
    /// Chosen framework
    pub framework: Framework,
}

impl Selection {
    /// Build a selection, trimming the name and falling back to `default_name`
    #[must_use]
    pub fn new(project_name: &str, default_name: &str, language: Language, framework: Framework) -> Self {
        Self {
            project_name: normalize_name(project_name, default_name),
            language,
            framework,
        }
    }
}

/// Answers already known before prompting
#[derive(Debug, Clone, Default)]
pub struct Presets {
    /// Positional project name from the command line
    pub project_name: Option<String>,
    /// `--lang`
    pub language: Option<Language>,
    /// `--framework`
    pub framework: Option<Framework>,
    /// `--yes`: take defaults instead of asking
    pub accept_defaults: bool,
}

/// Trimmed name, or the trimmed default, or [`FALLBACK_PROJECT_NAME`]
#[must_use]
pub fn normalize_name(name: &str, default_name: &str) -> String {
    [name, default_name]
        .iter()
        .map(|candidate| candidate.trim())
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(FALLBACK_PROJECT_NAME)
        .to_string()
}

/// Ask for whatever `presets` leaves open
///
/// Returns `Ok(None)` if the user cancels any question.
///
/// # Errors
///
/// Returns an error if the prompter fails for a reason other than cancellation.
pub fn collect<P: Prompter + ?Sized>(
    prompter: &mut P,
    presets: &Presets,
    configured_default: &str,
) -> Result<Option<Selection>> {
    let default_name = normalize_name(
        presets.project_name.as_deref().unwrap_or_default(),
        configured_default,
    );

    let project_name = if presets.accept_defaults {
        default_name.clone()
    } else {
        match prompter.text("Project name:", &default_name)? {
            Some(name) => name,
            None => return Ok(None),
        }
    };

    let language = match presets.language {
        Some(language) => language,
        None if presets.accept_defaults => Language::ALL[0],
        None => match choose(prompter, "Use TypeScript?", &Language::ALL, Language::label)? {
            Some(language) => language,
            None => return Ok(None),
        },
    };

    let framework = match presets.framework {
        Some(framework) => framework,
        None if presets.accept_defaults => Framework::ALL[0],
        None => match choose(prompter, "Use React?", &Framework::ALL, Framework::label)? {
            Some(framework) => framework,
            None => return Ok(None),
        },
    };

    let selection = Selection::new(&project_name, &default_name, language, framework);
    tracing::debug!(?selection, "collected answers");
    Ok(Some(selection))
}

fn choose<P, T>(
    prompter: &mut P,
    message: &str,
    options: &[T],
    label: fn(T) -> &'static str,
) -> Result<Option<T>>
where
    P: Prompter + ?Sized,
    T: Copy,
{
    let labels: Vec<&str> = options.iter().map(|&option| label(option)).collect();
    Ok(prompter
        .select(message, &labels)?
        .and_then(|index| options.get(index).copied()))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// One scripted reply
    #[derive(Debug, Clone)]
    pub enum Answer {
        Text(&'static str),
        Choice(usize),
        Cancel,
    }

    /// Replays answers in order and records the questions asked
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        pub asked: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn text(&mut self, message: &str, default: &str) -> Result<Option<String>> {
            self.asked.push(message.to_string());
            match self.answers.pop_front() {
                Some(Answer::Text("")) => Ok(Some(default.to_string())),
                Some(Answer::Text(text)) => Ok(Some(text.to_string())),
                Some(Answer::Cancel) => Ok(None),
                other => panic!("unexpected answer for text prompt: {other:?}"),
            }
        }

        fn select(&mut self, message: &str, items: &[&str]) -> Result<Option<usize>> {
            self.asked.push(message.to_string());
            match self.answers.pop_front() {
                Some(Answer::Choice(index)) => {
                    assert!(index < items.len());
                    Ok(Some(index))
                }
                Some(Answer::Cancel) => Ok(None),
                other => panic!("unexpected answer for select prompt: {other:?}"),
            }
        }
    }
}
