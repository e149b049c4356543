pub mod commands;
pub mod core;
mod help;
pub mod output;
mod shell;
pub mod shell_context;

pub use self::core::{CliError, CommandError};
pub use shell::{run_cli, SCRIPT_ENV};
pub use shell_context::{CliMode, ShellContext};
