use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use rust_decimal::Decimal;

use crate::currency::{format_amount, format_balance, format_ratio, format_share};

pub(crate) const COMMANDS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "summary",
        description: "Show totals, balance and expense ratio",
        usage: "summary",
        arguments: &[],
        handler: cmd_summary,
    },
    CommandDefinition {
        name: "title",
        description: "Show the current month header",
        usage: "title",
        arguments: &[],
        handler: cmd_title,
    },
];

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.ledger_manager.summary();
    let symbol = context.config.currency_symbol.as_str();

    output::section(context.title());
    output::info(format!(
        "  Balance  : {}",
        output::amount_colored(
            &format_balance(summary.net_balance, symbol),
            summary.net_balance >= Decimal::ZERO
        )
    ));
    output::info(format!(
        "  Income   : {}",
        output::amount_colored(&format_amount(summary.total_income, symbol), true)
    ));
    output::info(format!(
        "  Expenses : {}  ({} of income)",
        output::amount_colored(&format_amount(summary.total_expense, symbol), false),
        format_ratio(summary.expense_percentage)
    ));

    if !summary.expense_shares.is_empty() {
        output::section("Expense breakdown");
        for share in &summary.expense_shares {
            output::info(format!(
                "  #{:<4} {:<28} {:>12}  {}",
                share.id,
                share.label,
                format_amount(share.amount, symbol),
                format_share(share.share)
            ));
        }
    }

    if let Some(reason) = context.ledger_manager.last_save_error() {
        output::warning(format!("Unsaved changes: {reason}"));
    }
    Ok(())
}

fn cmd_title(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(context.title());
    Ok(())
}
