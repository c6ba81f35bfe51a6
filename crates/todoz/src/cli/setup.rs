use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.1.0"
/// Format for dev builds: "v0.1.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "todoz",
    bin_name = "todoz",
    version = get_version(),
    about = "A tiny todo list for the terminal",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding entries and config (defaults to $TODOZ_HOME, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log store activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Add an entry
    #[command(alias = "a")]
    Add {
        /// Entry text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Remove the entry with exactly this text
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show all entries
    #[command(alias = "ls")]
    List,

    /// Update an entry (not supported yet)
    Update {
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },

    /// Remove every entry (not supported yet)
    Clear,

    /// Interactive session: the list re-renders after every change
    Shell,

    /// Show or change configuration
    Config {
        /// Config key (storage-key, color)
        key: Option<String>,
        /// New value
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("todoz").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = parse(&[]);
        assert_eq!(cli.command, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_add_joins_words_later() {
        let cli = parse(&["add", "Buy", "milk"]);
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                text: vec!["Buy".into(), "milk".into()]
            })
        );
    }

    #[test]
    fn test_add_requires_text() {
        assert!(Cli::try_parse_from(["todoz", "add"]).is_err());
    }

    #[test]
    fn test_aliases() {
        assert!(matches!(parse(&["rm", "x"]).command, Some(Commands::Remove { .. })));
        assert!(matches!(parse(&["ls"]).command, Some(Commands::List)));
        assert!(matches!(parse(&["a", "x"]).command, Some(Commands::Add { .. })));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["list", "--data-dir", "/tmp/t", "-v"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/t")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_config_args() {
        let cli = parse(&["config", "color", "off"]);
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                key: Some("color".into()),
                value: Some("off".into())
            })
        );
    }
}
