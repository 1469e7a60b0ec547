//! User-interaction seam.
//!
//! All "only prompt when interactive" branching lives behind the [`Prompter`]
//! trait: interactive commands get a [`TerminalPrompter`], `--yes` runs get a
//! [`DefaultsPrompter`] that answers every prompt with its default and fails
//! on required prompts that have none.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::errors::PromptError;

pub trait Prompter {
    /// Yes/no question with a default answer.
    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError>;

    /// Select when `options` is non-empty, free-text input otherwise.
    /// `required` rejects an empty submission.
    fn select_or_input(
        &self,
        message: &str,
        options: &[String],
        default: Option<&str>,
        required: bool,
    ) -> Result<String, PromptError>;
}

/// Interactive prompts on the controlling terminal.
pub struct TerminalPrompter;

fn render_error(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            PromptError::Cancelled
        }
        other => PromptError::Render(other.to_string()),
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(default)
            .interact_opt()
            .map_err(render_error)?
            .ok_or(PromptError::Cancelled)
    }

    fn select_or_input(
        &self,
        message: &str,
        options: &[String],
        default: Option<&str>,
        required: bool,
    ) -> Result<String, PromptError> {
        if options.is_empty() {
            let theme = ColorfulTheme::default();
            let mut input = Input::<String>::with_theme(&theme)
                .with_prompt(message)
                .allow_empty(!required);
            if let Some(initial) = default {
                input = input.with_initial_text(initial);
            }
            return input.interact_text().map_err(render_error);
        }

        let default_index = default
            .and_then(|d| options.iter().position(|o| o == d))
            .unwrap_or(0);
        let chosen = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(options)
            .default(default_index)
            .interact_opt()
            .map_err(render_error)?;
        match chosen {
            Some(index) => Ok(options[index].clone()),
            None => Err(PromptError::Cancelled),
        }
    }
}

/// Answers every prompt with its default; never renders anything.
///
/// A required prompt without a default fails with [`PromptError::NoDefault`],
/// which is how default-values mode refuses decisions it cannot make.
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn confirm(&self, _message: &str, default: bool) -> Result<bool, PromptError> {
        Ok(default)
    }

    fn select_or_input(
        &self,
        message: &str,
        _options: &[String],
        default: Option<&str>,
        required: bool,
    ) -> Result<String, PromptError> {
        match default {
            Some(value) => Ok(value.to_string()),
            None if !required => Ok(String::new()),
            None => Err(PromptError::NoDefault {
                prompt: message.to_string(),
            }),
        }
    }
}
