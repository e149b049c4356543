use crate::cli::commands::{self, CommandDefinition};
use crate::cli::output;

pub fn print_overview() {
    output::section("Available commands");
    for entry in commands::all() {
        output::info(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandDefinition) {
    output::section(format!("Help: {}", entry.name));
    output::info(format!("  Description: {}", entry.description));
    output::info(format!("  Usage: {}", entry.usage));
    if !entry.arguments.is_empty() {
        output::info(format!("  Arguments: {}", entry.arguments.join(", ")));
    }
}
