//! # Todoz CLI
//!
//! The binary is intentionally thin: everything lives in `src/cli/`, and this
//! file only invokes `cli::run()` and turns errors into an exit code.
//!
//! ## Workspace Structure
//!
//! - `crates/todozapp/` — the store, dispatcher, notifier and persistence, with no terminal I/O
//! - `crates/todoz/` — this CLI, one client of `todozapp`
//!
//! ## Testing Approach
//!
//! - **Library (`crates/todozapp`)**: unit tests next to each module, run against
//!   the in-memory blob backend.
//! - **CLI (`src/cli/`)**: argument parsing tests, list rendering into a `Vec<u8>`,
//!   and scripted shell sessions.
//! - **End to end (`tests/`)**: the real binary against a temporary `TODOZ_HOME`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
