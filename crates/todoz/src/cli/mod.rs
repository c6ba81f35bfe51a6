//! # CLI Behavior
//!
//! This is **one possible UI client** for todoz, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`todoz`)
//!
//! Running `todoz` with no arguments defaults to `todoz list`.
//!
//! ## One-shot Commands
//!
//! `todoz add`, `todoz rm`, `todoz update`, `todoz clear` each build one command,
//! dispatch it, and exit. The list view is subscribed to the store, so a change
//! prints the full updated list before the status line.
//!
//! ## Shell (`todoz shell`)
//!
//! Reads commands from stdin, one per line, until `quit` or EOF. Rows of the last
//! rendered list double as removal controls (`x 2`).
//!
//! ## Storage Location
//!
//! `--data-dir` wins, then `$TODOZ_HOME`, then the OS data directory.
//!
//! ## Module Structure
//!
//! - `commands`: Context wiring, per-command handlers, the shell loop
//! - `render`: The list view (presentation adapter) and status messages
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
