//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Rebuild a nested, deterministically ordered tree from a flat repository listing
#[derive(Parser, Debug)]
#[command(name = "repotree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Directory holding a local .repotree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command that reads a listing.
#[derive(Args, Debug, Clone)]
pub struct ListingArgs {
    /// Listing JSON (git-trees API object or bare array of entries)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Additional name or extension to exclude (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Ignore configured exclusions, use only --exclude
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Fail on malformed listings instead of skipping bad entries
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the tree and write it as JSON
    Build {
        #[command(flatten)]
        listing: ListingArgs,

        /// Output file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the tree as text
    Tree {
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Print node counts and depth
    Stats {
        #[command(flatten)]
        listing: ListingArgs,
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
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
