//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Snailfish number arithmetic: add, reduce, and measure pair trees
#[derive(Parser, Debug)]
#[command(name = "snailfish")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .snailfish.toml (default: input file's directory)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    /// Abort any reduction after this many explode/split steps
    #[arg(long, global = true, env = "SNAILFISH_STEP_LIMIT")]
    pub step_limit: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print both homework answers for an input file
    Solve {
        /// File with one snailfish number per line
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Magnitude of the sum of all numbers in a file
    Sum {
        /// File with one snailfish number per line
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Also print the reduced sum
        #[arg(short, long)]
        show: bool,
    },

    /// Largest magnitude of any two different numbers in a file
    Largest {
        /// File with one snailfish number per line
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Add literals left to right
    Add {
        /// Snailfish literals, e.g. "[[1,2],3]"
        #[arg(required = true)]
        numbers: Vec<String>,
    },

    /// Reduce a single literal
    Reduce {
        /// Snailfish literal
        number: String,
    },

    /// Magnitude of a literal as written
    Magnitude {
        /// Snailfish literal
        number: String,
    },

    /// Show a literal as a tree
    Tree {
        /// Snailfish literal
        number: String,
        /// Reduce before showing
        #[arg(short, long)]
        reduce: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config instead of local
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
