//! Dispatch, error reporting and prompt helpers shared by every command.

use std::io;

use dialoguer::{Confirm, Input, Select};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::config::ConfigError;
use crate::core::services::ServiceError;
use crate::errors::LedgerError;

use super::commands;
use super::output;
use super::shell::CommandLine;
pub use super::shell_context::{CliMode, ShellContext};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Fatal failures that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Per-command failures; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Ledger(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl ShellContext {
    /// Runs one parsed line; unknown names get a suggestion instead of an error.
    pub(crate) fn dispatch(&mut self, line: &CommandLine) -> Result<LoopControl, CommandError> {
        let Some(command) = commands::find(&line.name) else {
            self.suggest_command(&line.name);
            return Ok(LoopControl::Continue);
        };
        let args = line.args();
        match (command.handler)(self, &args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, input: &str) -> Result<LoopControl, CommandError> {
        match CommandLine::parse(input)? {
            Some(line) => self.dispatch(&line),
            None => Ok(LoopControl::Continue),
        }
    }

    pub(crate) fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        commands::names()
            .map(|name| (levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.closest_command(input) {
            output::hint(format!("Did you mean `{best}`?"));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(err) if err.is_user_error() => {
                output::error(err);
                Ok(())
            }
            CommandError::Dialoguer(err) => Err(CliError::Prompt(err)),
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt("Exit budget tracker?")
            .default(true)
            .interact()?;
        Ok(answer)
    }

    pub(crate) fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn prompt_text(&self, prompt: &str) -> Result<String, CommandError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(CommandError::from)
    }

    pub(crate) fn prompt_select(&self, prompt: &str, items: &[&str]) -> Result<usize, CommandError> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(CommandError::from)
    }
}
