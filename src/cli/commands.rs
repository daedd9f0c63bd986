//! Command parsing and dispatch for `money_tracker_cli`.

use dialoguer::{theme::ColorfulTheme, Input, Select};
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::TransactionStore,
    dashboard::Dashboard,
    errors::{TrackerError, ValidationError},
    ledger::{Category, TransactionFilter, TransactionId, TransactionKind},
    storage::JsonStorage,
    utils::build_info,
};

use super::{output, render::Renderer};

const COMMAND_NAMES: [&str; 9] = [
    "add",
    "remove",
    "list",
    "summary",
    "breakdown",
    "categories",
    "backups",
    "version",
    "help",
];

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Usage(String),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        kind: TransactionKind,
        amount: String,
        category: Category,
        description: String,
    },
    AddInteractive,
    Remove(TransactionId),
    List(TransactionFilter),
    Summary,
    Breakdown,
    Categories,
    Backups,
    Version,
    Help,
}

impl Command {
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };
        match name.as_str() {
            "add" if rest.is_empty() => Ok(Command::AddInteractive),
            "add" => parse_add(rest),
            "remove" | "rm" => {
                let raw = rest
                    .first()
                    .ok_or_else(|| CliError::Usage("remove requires a transaction id".into()))?;
                let id = raw
                    .parse::<TransactionId>()
                    .map_err(|_| CliError::Usage(format!("`{raw}` is not a transaction id")))?;
                Ok(Command::Remove(id))
            }
            "list" | "ls" => {
                let filter = match rest.first() {
                    Some(raw) => raw.parse::<TransactionFilter>()?,
                    None => TransactionFilter::All,
                };
                Ok(Command::List(filter))
            }
            "summary" => Ok(Command::Summary),
            "breakdown" => Ok(Command::Breakdown),
            "categories" => Ok(Command::Categories),
            "backups" => Ok(Command::Backups),
            "version" | "--version" | "-V" => Ok(Command::Version),
            "help" | "--help" | "-h" => Ok(Command::Help),
            other => Err(CliError::Usage(unknown_command_message(other))),
        }
    }
}

fn parse_add(rest: &[String]) -> Result<Command, CliError> {
    if rest.len() < 4 {
        return Err(CliError::Usage(
            "usage: add <income|expense> <amount> <category> <description...>".into(),
        ));
    }
    Ok(Command::Add {
        kind: rest[0].parse::<TransactionKind>()?,
        amount: rest[1].clone(),
        category: rest[2].parse::<Category>()?,
        description: rest[3..].join(" "),
    })
}

fn unknown_command_message(input: &str) -> String {
    let mut message = format!("unknown command `{input}`");
    let best = COMMAND_NAMES
        .iter()
        .map(|name| (levenshtein(name, input), *name))
        .min_by_key(|(distance, _)| *distance);
    if let Some((distance, name)) = best {
        if distance <= 3 {
            message.push_str(&format!(" (did you mean `{name}`?)"));
        }
    }
    message
}

/// Everything a command needs: loaded configuration, the dashboard and the storage root.
pub struct CliContext {
    pub config: Config,
    pub dashboard: Dashboard,
    pub storage: JsonStorage,
    pub renderer: Renderer,
}

impl CliContext {
    pub fn load() -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        Self::with_manager(&manager)
    }

    pub fn with_manager(manager: &ConfigManager) -> Result<Self, CliError> {
        let config = manager.load()?;
        let storage = JsonStorage::new(
            Some(manager.data_root(&config)),
            Some(config.backup_retention),
        )?;
        let store = TransactionStore::open_with(
            Box::new(storage.clone()),
            config.storage_key.clone(),
            Box::new(crate::core::SystemClock),
        );
        output::set_color_enabled(config.ui_color_enabled);
        let renderer = Renderer::new(output::color_enabled());
        let dashboard = Dashboard::new(store, config.currency.clone());
        Ok(Self {
            config,
            dashboard,
            storage,
            renderer,
        })
    }
}

pub fn run_cli<I, S>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let command = Command::parse(args)?;
    if matches!(command, Command::Help) {
        print!("{}", usage());
        return Ok(());
    }
    if matches!(command, Command::Version) {
        print_version();
        return Ok(());
    }
    let mut context = CliContext::load()?;
    execute(&mut context, command)
}

pub fn execute(context: &mut CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Add {
            kind,
            amount,
            category,
            description,
        } => add(context, &description, &amount, category, kind),
        Command::AddInteractive => {
            let form = prompt_transaction()?;
            add(
                context,
                &form.description,
                &form.amount,
                form.category,
                form.kind,
            )
        }
        Command::Remove(id) => {
            match context.dashboard.on_delete_transaction(id) {
                Some(removed) => output::success(format!(
                    "Removed `{}` ({})",
                    removed.description, removed.id
                )),
                None => output::warning(format!("No transaction with id {id}")),
            }
            Ok(())
        }
        Command::List(filter) => {
            context.dashboard.on_filter_change(filter);
            print!("{}", context.renderer.transactions(&context.dashboard.view()));
            Ok(())
        }
        Command::Summary => {
            let view = context.dashboard.view();
            print!("{}", context.renderer.summary(&view));
            Ok(())
        }
        Command::Breakdown => {
            print!("{}", context.renderer.breakdown(&context.dashboard.view()));
            Ok(())
        }
        Command::Categories => {
            print!("{}", context.renderer.categories());
            Ok(())
        }
        Command::Backups => {
            let backups = context.storage.list_backups(&context.config.storage_key)?;
            if backups.is_empty() {
                output::info("No backups yet");
            }
            for name in backups {
                println!(
                    "{}",
                    context
                        .storage
                        .backup_path(&context.config.storage_key, &name)
                        .display()
                );
            }
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
        Command::Help => {
            print!("{}", usage());
            Ok(())
        }
    }
}

fn add(
    context: &mut CliContext,
    description: &str,
    amount: &str,
    category: Category,
    kind: TransactionKind,
) -> Result<(), CliError> {
    let txn = context
        .dashboard
        .on_add_transaction(description, amount, category, kind)?;
    output::success(format!(
        "Added {} `{}` ({}) with id {}",
        txn.kind.value(),
        txn.description,
        txn.category.label(),
        txn.id
    ));
    Ok(())
}

struct TransactionForm {
    description: String,
    amount: String,
    category: Category,
    kind: TransactionKind,
}

fn prompt_transaction() -> Result<TransactionForm, CliError> {
    let theme = ColorfulTheme::default();
    let description: String = Input::with_theme(&theme)
        .with_prompt("Description")
        .interact_text()?;
    let amount: String = Input::with_theme(&theme)
        .with_prompt("Amount")
        .interact_text()?;
    let kinds = [TransactionKind::Expense, TransactionKind::Income];
    let kind_index = Select::with_theme(&theme)
        .with_prompt("Type")
        .items(&kinds.map(|kind| kind.to_string()))
        .default(0)
        .interact()?;
    let category_index = Select::with_theme(&theme)
        .with_prompt("Category")
        .items(&Category::ALL.map(Category::label))
        .default(0)
        .interact()?;
    Ok(TransactionForm {
        description,
        amount,
        category: Category::ALL[category_index],
        kind: kinds[kind_index],
    })
}

fn print_version() {
    let build = build_info::current();
    println!("{}", build.summary());
    println!("built {} for {} ({})", build.timestamp, build.target, build.profile);
    println!("{}", build.rustc);
}

pub fn usage() -> String {
    "Usage: money_tracker_cli <command>\n\
     Commands:\n  \
     add <income|expense> <amount> <category> <description...>\n  \
     add                      (interactive form)\n  \
     remove <id>\n  \
     list [all|income|expense]\n  \
     summary\n  \
     breakdown\n  \
     categories\n  \
     backups\n  \
     version\n\
     Data is stored under $MONEY_TRACKER_HOME (default ~/.money_tracker).\n"
        .to_string()
}
