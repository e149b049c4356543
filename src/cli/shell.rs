use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::commands;
use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::config::Config;

pub const SCRIPT_ENV: &str = "BUDGET_TRACKER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, records = context.ledger().len(), "shell started");

    match mode {
        CliMode::Interactive => {
            let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
            editor.set_helper(Some(ShellHelper));
            editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
            output::section(context.title());
            output::hint("Type `help` to list commands, `?` or Tab to complete.");
            drive(&mut context, EditorInput(editor))
        }
        CliMode::Script => drive(&mut context, io::stdin().lock().lines()),
    }
}

/// Supplies raw command lines to the shell loop.
trait LineSource {
    /// `Ok(None)` ends the session.
    fn next_line(&mut self, context: &ShellContext) -> Result<Option<String>, CliError>;
}

impl<B: BufRead> LineSource for io::Lines<B> {
    fn next_line(&mut self, _context: &ShellContext) -> Result<Option<String>, CliError> {
        Ok(self.next().transpose()?)
    }
}

struct EditorInput(Editor<ShellHelper, DefaultHistory>);

impl LineSource for EditorInput {
    fn next_line(&mut self, context: &ShellContext) -> Result<Option<String>, CliError> {
        loop {
            match self.0.readline(&context.prompt()) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.0.add_history_entry(line.trim()).ok();
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    if context.confirm_exit()? {
                        return Ok(None);
                    }
                }
                Err(ReadlineError::Eof) => {
                    output::info("Exiting shell.");
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn drive(context: &mut ShellContext, mut source: impl LineSource) -> Result<(), CliError> {
    while context.running {
        let Some(input) = source.next_line(context)? else {
            break;
        };
        let outcome = CommandLine::parse(&input).and_then(|line| match line {
            Some(line) => context.dispatch(&line),
            None => Ok(LoopControl::Continue),
        });
        match outcome {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }

    if let Some(reason) = context.ledger_manager.last_save_error() {
        output::warning(format!("Leaving with unsaved changes: {reason}"));
    }
    Ok(())
}

/// A command name (lowercased) and its arguments, split shell-style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Blank lines and `#` comments yield `None`.
    pub(crate) fn parse(input: &str) -> Result<Option<Self>, CommandError> {
        let words = shell_words::split(input).map_err(|err| {
            CommandError::InvalidArguments(format!("cannot parse `{}`: {err}", input.trim()))
        })?;
        let mut words = words.into_iter();
        match words.next() {
            None => Ok(None),
            Some(first) if first.starts_with('#') => Ok(None),
            Some(first) => Ok(Some(Self {
                name: first.to_lowercase(),
                args: words.collect(),
            })),
        }
    }

    pub(crate) fn args(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

/// Completes command names, then each command's argument words and config keys.
struct ShellHelper;

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(completions(&line[..pos]))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

fn completions(prefix: &str) -> (usize, Vec<Pair>) {
    let start = prefix.rfind(char::is_whitespace).map_or(0, |idx| idx + 1);
    let partial = prefix[start..].to_lowercase();
    let typed: Vec<String> = prefix[..start]
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let typed: Vec<&str> = typed.iter().map(String::as_str).collect();

    let pool: Vec<&'static str> = match typed.as_slice() {
        [] | ["help"] => commands::names().collect(),
        ["config", "get" | "set"] => Config::KEYS.to_vec(),
        [command] => commands::find(command)
            .map(|entry| entry.arguments.to_vec())
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    let pairs = pool
        .into_iter()
        .filter(|word| word.starts_with(&partial))
        .map(|word| Pair {
            display: word.to_string(),
            replacement: word.to_string(),
        })
        .collect();
    (start, pairs)
}
