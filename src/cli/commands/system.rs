use crate::cli::commands::{self, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::utils::build_info;

pub(crate) const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "version",
        description: "Show build metadata",
        usage: "version",
        arguments: &[],
        handler: cmd_version,
    },
    CommandDefinition {
        name: "help",
        description: "Show available commands",
        usage: "help [command]",
        arguments: &[],
        handler: cmd_help,
    },
    CommandDefinition {
        name: "exit",
        description: "Exit the shell",
        usage: "exit",
        arguments: &[],
        handler: cmd_exit,
    },
];

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Budget Tracker {}", meta.version));
    output::info(format!(
        "  Build hash : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Target     : {}", meta.target));
    output::info(format!("  Profile    : {}", meta.profile));
    output::info(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match commands::find(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview();
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
