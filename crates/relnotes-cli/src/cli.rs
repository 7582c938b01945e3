use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "relnotes")]
#[command(about = "Manage the notes shown in a release view from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Notes API base URL (e.g. https://example.com/rna)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Release view: a release id or a release resource URL
    #[arg(long, global = true, value_name = "ID_OR_URL")]
    pub release: Option<String>,

    /// Profile name for persistent configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the release view's notes and print the table
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
    /// Associate an existing note with the release view
    Add {
        /// Note id
        id: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
    /// Remove a note from the release view
    Remove {
        /// Note id
        id: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },
    /// Configure persistent profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the profile values currently in effect
    Show,
    /// Set profile values
    Set {
        /// Notes API base URL
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Release id or resource URL
        #[arg(long, value_name = "ID_OR_URL")]
        release: Option<String>,
        /// Admin change-page base for edit links
        #[arg(long, value_name = "URL")]
        edit_url_base: Option<String>,
        /// Bug-tracker link base
        #[arg(long, value_name = "URL")]
        bug_url_base: Option<String>,
    },
}
