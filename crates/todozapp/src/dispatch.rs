//! # Command Dispatch
//!
//! Routes a user intent to the matching [`Store`] operation.
//!
//! [`Command`] is a closed set: adding a variant forces every `match` on it to be
//! revisited. Front ends that only have strings (a shell, a script) go through
//! [`Dispatcher::execute_named`], where an unrecognised kind is simply ignored.
//!
//! ## Update and Clear
//!
//! Both kinds are accepted but not implemented. Their intended semantics are
//! still undecided, so they answer [`Outcome::NotSupported`] and leave the store
//! alone rather than guessing.

use crate::model::Entry;
use crate::store::Store;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Entry),
    RemoveByText(String),
    Update(Entry),
    Clear,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Add(_) => CommandKind::Add,
            Command::RemoveByText(_) => CommandKind::RemoveByText,
            Command::Update(_) => CommandKind::Update,
            Command::Clear => CommandKind::Clear,
        }
    }

    /// Builds a command from its wire name and a text payload.
    pub fn from_parts(kind: CommandKind, payload: &str) -> Self {
        match kind {
            CommandKind::Add => Command::Add(Entry::new(payload)),
            CommandKind::RemoveByText => Command::RemoveByText(payload.to_string()),
            CommandKind::Update => Command::Update(Entry::new(payload)),
            CommandKind::Clear => Command::Clear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Add,
    RemoveByText,
    Update,
    Clear,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Add => "add",
            CommandKind::RemoveByText => "remove-by-text",
            CommandKind::Update => "update",
            CommandKind::Clear => "clear",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommandKind(pub String);

impl fmt::Display for UnknownCommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command kind: {}", self.0)
    }
}

impl std::error::Error for UnknownCommandKind {}

impl FromStr for CommandKind {
    type Err = UnknownCommandKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(CommandKind::Add),
            "remove-by-text" => Ok(CommandKind::RemoveByText),
            "update" => Ok(CommandKind::Update),
            "clear" => Ok(CommandKind::Clear),
            other => Err(UnknownCommandKind(other.to_string())),
        }
    }
}

/// What happened to a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The store operation ran; carries its boolean result.
    Applied(bool),
    /// A declared kind with no behaviour yet. Nothing changed.
    NotSupported(CommandKind),
    /// The kind was not recognised. Nothing changed.
    Ignored,
}

fn not_supported(kind: CommandKind) -> Outcome {
    debug!(%kind, "command kind not supported yet");
    Outcome::NotSupported(kind)
}

pub struct Dispatcher {
    store: Rc<Store>,
}

impl Dispatcher {
    pub fn new(store: Rc<Store>) -> Self {
        Self { store }
    }

    pub fn execute(&self, command: Command) -> Outcome {
        match command {
            Command::Add(entry) => Outcome::Applied(self.store.add(entry)),
            Command::RemoveByText(text) => Outcome::Applied(self.store.remove_by_text(&text)),
            Command::Update(_) => not_supported(CommandKind::Update),
            Command::Clear => not_supported(CommandKind::Clear),
        }
    }

    pub fn execute_named(&self, kind: &str, payload: &str) -> Outcome {
        match kind.parse::<CommandKind>() {
            Ok(kind) => self.execute(Command::from_parts(kind, payload)),
            Err(e) => {
                debug!(error = %e, "ignoring command");
                Outcome::Ignored
            }
        }
    }
}
