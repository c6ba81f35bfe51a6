//! # Rendering
//!
//! [`ListView`] is the terminal presentation adapter. Subscribed to the store, it
//! redraws the whole list on every change; there is no incremental patching.
//!
//! Each rendered row is also a removal control: [`ListView::remove_control`]
//! turns a row number from the last frame into a remove-by-text command keyed
//! by that row's text, so a later change in ordering can never remove the
//! wrong entry.

use colored::Colorize;
use std::cell::{Ref, RefCell};
use std::io::Write;
use todozapp::dispatch::Command;
use todozapp::error::{Result, TodozError};
use todozapp::model::Entry;
use todozapp::notifier::Subscriber;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const EMPTY_LIST: &str = "No entries.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

pub fn render_message(message: &CmdMessage, color: bool) -> String {
    if !color {
        return message.content.clone();
    }
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

/// Renders the full list, one numbered row per entry.
pub fn render_list(entries: &[Entry], color: bool) -> String {
    if entries.is_empty() {
        return if color {
            format!("{}\n", EMPTY_LIST.dimmed())
        } else {
            format!("{}\n", EMPTY_LIST)
        };
    }

    let number_width = entries.len().to_string().len();
    let mut out = String::new();

    for (i, entry) in entries.iter().enumerate() {
        let number = format!("{:>width$}. ", i + 1, width = number_width);
        let available = LINE_WIDTH.saturating_sub(number.width() + 2);
        let text = truncate_to_width(entry.text(), available);

        if color {
            out.push_str(&format!("  {}{}\n", number.yellow(), text));
        } else {
            out.push_str(&format!("  {}{}\n", number, text));
        }
    }

    out
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Presentation adapter writing full frames to `W`.
pub struct ListView<W: Write> {
    out: RefCell<W>,
    color: bool,
    rendered: RefCell<Vec<String>>,
}

impl<W: Write> ListView<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out: RefCell::new(out),
            color,
            rendered: RefCell::new(Vec::new()),
        }
    }

    /// Draws `entries` and remembers them as the current frame.
    pub fn render(&self, entries: &[Entry]) -> Result<()> {
        let frame = render_list(entries, self.color);
        *self.rendered.borrow_mut() = entries.iter().map(|e| e.text().to_string()).collect();

        let mut out = self.out.borrow_mut();
        out.write_all(frame.as_bytes()).map_err(TodozError::Io)?;
        out.flush().map_err(TodozError::Io)?;
        Ok(())
    }

    pub fn print_messages(&self, messages: &[CmdMessage]) -> Result<()> {
        let mut out = self.out.borrow_mut();
        for message in messages {
            writeln!(out, "{}", render_message(message, self.color)).map_err(TodozError::Io)?;
        }
        out.flush().map_err(TodozError::Io)?;
        Ok(())
    }

    /// The command behind row `number` (1-based) of the last frame.
    pub fn remove_control(&self, number: usize) -> Option<Command> {
        let rendered = self.rendered.borrow();
        let text = rendered.get(number.checked_sub(1)?)?;
        Some(Command::RemoveByText(text.clone()))
    }

    pub fn writer(&self) -> Ref<'_, W> {
        self.out.borrow()
    }
}

impl<W: Write> Subscriber for ListView<W> {
    fn on_change(&self, entries: &[Entry]) -> Result<()> {
        self.render(entries)
    }
}
