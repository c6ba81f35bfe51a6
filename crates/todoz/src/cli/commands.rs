use super::render::{CmdMessage, ListView};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, BufRead, Stdout, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use todozapp::api::TodozApi;
use todozapp::backend::BlobBackend;
use todozapp::backend::fs::FsBackend;
use todozapp::config::TodozConfig;
use todozapp::dispatch::{Command, Outcome};
use todozapp::error::{Result, TodozError};
use todozapp::model::Entry;
use todozapp::notifier::Subscriber;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "TODOZ_HOME";

struct AppContext {
    api: TodozApi<FsBackend>,
    view: Rc<ListView<Stdout>>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;

    // Config does not need the store
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&data_dir, key.as_deref(), value.as_deref());
    }

    let ctx = init_context(&data_dir)?;

    match cli.command {
        Some(Commands::Add { text }) => handle_add(&ctx, &text.join(" ")),
        Some(Commands::Remove { text }) => handle_remove(&ctx, &text.join(" ")),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Update { text }) => {
            handle_reserved(&ctx, Command::Update(Entry::new(text.join(" "))))
        }
        Some(Commands::Clear) => handle_reserved(&ctx, Command::Clear),
        Some(Commands::Shell) => {
            let stdin = io::stdin();
            run_shell(&ctx.api, &*ctx.view, stdin.lock())
        }
        Some(Commands::Config { .. }) => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("todoz=debug,todozapp=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "todoz", "todoz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TodozError::Config("Could not determine a data directory".into()))
}

fn init_context(data_dir: &Path) -> Result<AppContext> {
    let config = TodozConfig::load(data_dir)?;
    debug!(data_dir = %data_dir.display(), key = %config.storage_key, "opening store");
    let view = Rc::new(ListView::new(io::stdout(), config.color));
    let api = TodozApi::new(FsBackend::new(data_dir), config);

    let subscriber: Rc<dyn Subscriber> = view.clone();
    api.subscribe(&subscriber);

    Ok(AppContext { api, view })
}

fn handle_add(ctx: &AppContext, text: &str) -> Result<()> {
    match ctx.api.submit(text) {
        None => Err(TodozError::Api("Entry text cannot be empty".into())),
        Some(Outcome::Applied(false)) => ctx.view.print_messages(&[CmdMessage::info(format!(
            "Already in the list: {}",
            text.trim()
        ))]),
        Some(outcome) => ctx.view.print_messages(&[outcome_message(&outcome, text.trim())]),
    }
}

fn handle_remove(ctx: &AppContext, text: &str) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TodozError::Api("Entry text cannot be empty".into()));
    }
    let message = match ctx.api.execute(Command::RemoveByText(text.to_string())) {
        Outcome::Applied(false) => CmdMessage::info(format!("Not found: {}", text)),
        outcome => outcome_message(&outcome, text),
    };
    ctx.view.print_messages(&[message])
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    ctx.view.render(&ctx.api.items())
}

fn handle_reserved(ctx: &AppContext, command: Command) -> Result<()> {
    let outcome = ctx.api.execute(command);
    ctx.view.print_messages(&[outcome_message(&outcome, "")])
}

fn handle_config(data_dir: &Path, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let mut config = TodozConfig::load(data_dir)?;
    let mut stdout = io::stdout();

    match (key, value) {
        (None, _) => {
            for key in ["storage-key", "color"] {
                writeln!(stdout, "{} = {}", key, config.get(key)?).map_err(TodozError::Io)?;
            }
        }
        (Some(key), None) => {
            writeln!(stdout, "{}", config.get(key)?).map_err(TodozError::Io)?;
        }
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(data_dir)?;
            writeln!(stdout, "{} = {}", key, config.get(key)?).map_err(TodozError::Io)?;
        }
    }
    Ok(())
}

/// User-facing line for a dispatched command. `text` is the command's key.
fn outcome_message(outcome: &Outcome, text: &str) -> CmdMessage {
    match outcome {
        Outcome::Applied(true) => CmdMessage::success("Done."),
        Outcome::Applied(false) => CmdMessage::info(format!("No change: {}", text)),
        Outcome::NotSupported(kind) => {
            CmdMessage::warning(format!("'{}' is not supported yet", kind))
        }
        Outcome::Ignored => CmdMessage::error("Unknown command"),
    }
}

const SHELL_HELP: &str = "\
Commands:
  add <text>     add an entry
  rm <text>      remove the entry with this text
  x <n>          remove the entry shown at row n
  list           show all entries
  help           show this help
  quit           leave the shell";

/// Line-oriented session. Every change re-renders through the subscribed view.
pub(super) fn run_shell<B, W, R>(api: &TodozApi<B>, view: &ListView<W>, input: R) -> Result<()>
where
    B: BlobBackend + 'static,
    W: Write,
    R: BufRead,
{
    view.render(&api.items())?;

    for line in input.lines() {
        let line = line.map_err(TodozError::Io)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let message = match verb {
            "quit" | "exit" | "q" => break,
            "help" | "?" => Some(CmdMessage::info(SHELL_HELP)),
            "list" | "ls" => {
                view.render(&api.items())?;
                None
            }
            "add" | "a" => match api.submit(rest) {
                None => Some(CmdMessage::error("Entry text cannot be empty")),
                Some(Outcome::Applied(false)) => {
                    Some(CmdMessage::info(format!("Already in the list: {}", rest)))
                }
                Some(_) => None,
            },
            "rm" if rest.is_empty() => Some(CmdMessage::error("Usage: rm <text>")),
            "rm" => match api.execute(Command::RemoveByText(rest.to_string())) {
                Outcome::Applied(false) => Some(CmdMessage::info(format!("Not found: {}", rest))),
                _ => None,
            },
            "x" if rest.is_empty() => Some(CmdMessage::error("Usage: x <n>")),
            "x" => match rest.parse::<usize>().ok().and_then(|n| view.remove_control(n)) {
                Some(command) => match api.execute(command) {
                    Outcome::Applied(false) => Some(CmdMessage::info("Already gone")),
                    _ => None,
                },
                None => Some(CmdMessage::error(format!("No entry at row {}", rest))),
            },
            other => match api.execute_named(other, rest) {
                Outcome::Ignored => Some(CmdMessage::error(format!(
                    "Unknown command: {} (try 'help')",
                    other
                ))),
                outcome => Some(outcome_message(&outcome, rest)),
            },
        };

        if let Some(message) = message {
            view.print_messages(&[message])?;
        }
    }

    Ok(())
}
