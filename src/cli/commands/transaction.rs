use crate::cli::commands::{CommandDefinition, KIND_ARGUMENTS};
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::core::services::{SummaryService, TransactionService};
use crate::currency::{format_share, format_signed_amount};
use crate::errors::LedgerError;
use crate::ledger::{Transaction, TransactionKind};

const CONFIRM_FLAGS: [&str; 2] = ["--yes", "-y"];

pub(crate) const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "add",
        description: "Record an income or expense",
        usage: "add <income|expense> <description> <amount>",
        arguments: KIND_ARGUMENTS,
        handler: cmd_add,
    },
    CommandDefinition {
        name: "delete",
        description: "Delete a record by id after confirmation",
        usage: "delete <id> [--yes]",
        arguments: &CONFIRM_FLAGS,
        handler: cmd_delete,
    },
    CommandDefinition {
        name: "list",
        description: "List records, optionally of one kind",
        usage: "list [income|expense]",
        arguments: KIND_ARGUMENTS,
        handler: cmd_list,
    },
];

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, label, amount) = if args.is_empty() && context.mode == CliMode::Interactive {
        prompt_add_fields(context)?
    } else {
        collect_add_fields(args)
    };
    let request = TransactionService::parse_request(&kind, &label, &amount)?;
    context.ledger_manager.add_request(request)?;
    Ok(())
}

/// Positional arguments; anything between kind and amount is the description.
fn collect_add_fields(args: &[&str]) -> (String, String, String) {
    match args {
        [] => (String::new(), String::new(), String::new()),
        [kind] => (kind.to_string(), String::new(), String::new()),
        [kind, label] => (kind.to_string(), label.to_string(), String::new()),
        [kind, label @ .., amount] => (kind.to_string(), label.join(" "), amount.to_string()),
    }
}

fn prompt_add_fields(context: &ShellContext) -> Result<(String, String, String), CommandError> {
    let kinds: Vec<&str> = TransactionKind::ALL.iter().map(|kind| kind.as_str()).collect();
    let choice = context.prompt_select("Type", &kinds)?;
    let label = context.prompt_text("Description")?;
    let amount = context.prompt_text("Amount")?;
    Ok((kinds[choice].to_string(), label, amount))
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let confirmed_by_flag = args.iter().any(|arg| CONFIRM_FLAGS.contains(arg));
    let Some(raw_id) = args.iter().find(|arg| !CONFIRM_FLAGS.contains(*arg)) else {
        return Err(CommandError::InvalidArguments("usage: delete <id> [--yes]".into()));
    };
    let id = TransactionService::parse_id(raw_id)?;
    let label = match context.ledger().get(id) {
        Some(txn) => txn.label().to_string(),
        None => return Err(LedgerError::NotFound(id).into()),
    };

    let confirmed = if confirmed_by_flag {
        true
    } else if context.mode == CliMode::Script {
        output::warning(format!(
            "Refusing to delete \"{label}\" without confirmation; pass --yes in script mode."
        ));
        false
    } else {
        context.confirm(&format!("Delete \"{label}\"?"), false)?
    };

    if !confirmed {
        output::info("Deletion cancelled.");
        return Ok(());
    }
    context.ledger_manager.remove_by_id(id)?;
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kinds: Vec<TransactionKind> = match args.first() {
        None => TransactionKind::ALL.to_vec(),
        Some(raw) => vec![raw.parse::<TransactionKind>()?],
    };

    for kind in kinds {
        let heading = match kind {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expenses",
        };
        output::section(heading);
        let records = context.ledger_manager.list_by_kind(kind);
        if records.is_empty() {
            output::info("  (none)");
            continue;
        }
        for txn in records {
            output::info(render_row(context, txn));
        }
    }
    Ok(())
}

pub(crate) fn render_row(context: &ShellContext, txn: &Transaction) -> String {
    let amount = format_signed_amount(txn.kind(), txn.amount(), &context.config.currency_symbol);
    let amount = output::amount_colored(&amount, txn.is_income());
    let mut row = format!("  #{:<4} {:<28} {}", txn.id(), txn.label(), amount);
    if txn.is_expense() {
        let share = SummaryService::per_expense_share(txn, context.ledger_manager.all());
        row.push_str(&format!("  ({})", format_share(share)));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_may_span_several_words() {
        let (kind, label, amount) = collect_add_fields(&["expense", "Gym", "membership", "45"]);
        assert_eq!(kind, "expense");
        assert_eq!(label, "Gym membership");
        assert_eq!(amount, "45");
    }

    #[test]
    fn missing_fields_stay_empty() {
        let (_, label, amount) = collect_add_fields(&["income", "Bonus"]);
        assert_eq!(label, "Bonus");
        assert!(amount.is_empty());
    }
}
