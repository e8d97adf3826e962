//! CLI parse: clap types for tapelink. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tapelink CLI - compile two-track Turing machines into symlink dispatch trees
#[derive(Parser, Debug)]
#[command(name = "tapelink")]
#[command(about = "Compile two-track Turing machines into symlink dispatch trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a machine and write its artifact tree
    Build {
        /// Machine description (TOML, or JSON by extension); defaults to the bundled primality tester
        #[arg(long)]
        machine: Option<PathBuf>,
        /// Output root; must not exist yet
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compile a machine and print its mono-state table without writing anything
    Plan {
        /// Machine description (TOML, or JSON by extension); defaults to the bundled primality tester
        #[arg(long)]
        machine: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
