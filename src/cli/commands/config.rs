use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::shell_context::apply_config;
use crate::config::Config;

/// Settings read once when the slot is opened.
const RESTART_KEYS: [&str; 2] = ["slot_name", "seed_sample_data"];

pub(crate) const COMMANDS: &[CommandDefinition] = &[CommandDefinition {
    name: "config",
    description: "View and change preferences",
    usage: "config [show|get <key>|set <key> <value>]",
    arguments: &["show", "get", "set"],
    handler: cmd_config,
}];

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show_config(context),
        ["get", key] => {
            output::info(format!("{key} = {}", context.config.get(key)?));
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            set_config_value(context, key, value.join(" ").trim())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show|get <key>|set <key> <value>]".into(),
        )),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for key in Config::KEYS {
        output::info(format!("  {key:<18} {}", context.config.get(key)?));
    }
    output::info(format!("  {:<18} {}", "data_dir", context.data_dir.display()));
    output::info(format!(
        "  {:<18} {}",
        "config_file",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;
    context.config = updated;
    apply_config(&context.config);
    tracing::info!(key, value, "configuration updated");

    output::success(format!("{key} set to {value}."));
    if RESTART_KEYS.contains(&key) {
        output::hint("This setting takes effect the next time the tracker starts.");
    }
    Ok(())
}
