//! Command table for the budget shell.

pub mod config;
pub mod summary;
pub mod system;
pub mod transaction;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// One shell command. `arguments` lists the words offered for completion after the name.
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub arguments: &'static [&'static str],
    pub handler: CommandHandler,
}

const KIND_ARGUMENTS: &[&str] = &["income", "expense"];

const TABLE: &[&[CommandDefinition]] = &[
    transaction::COMMANDS,
    summary::COMMANDS,
    config::COMMANDS,
    system::COMMANDS,
];

/// Every command, in help order.
pub fn all() -> impl Iterator<Item = &'static CommandDefinition> {
    TABLE.iter().flat_map(|group| group.iter())
}

pub fn find(name: &str) -> Option<&'static CommandDefinition> {
    all().find(|command| command.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    all().map(|command| command.name)
}
