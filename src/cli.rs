//! CLI definitions for tabrelay.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// tabrelay CLI.
#[derive(Parser)]
#[command(name = "tabrelay")]
#[command(about = "Copy numbered form fields from one open browser tab to another")]
#[command(version)]
pub(crate) struct Cli {
    /// Settings file path (defaults to the platform config dir)
    #[arg(short, long, global = true, env = "TABRELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of the settings file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show, check, save or clear the field mapping
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage named mapping presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Show which tabs the current mapping resolves to
    Tabs,

    /// Copy fields from the source tab to the destination tab
    Copy {
        /// Use this preset instead of the saved mapping
        #[arg(long, conflicts_with = "file")]
        preset: Option<String>,

        /// Use the mapping in this file instead of the saved one
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the saved mapping
    Show,

    /// Parse a mapping and report problems without saving it
    Check {
        /// Mapping file (defaults to the saved mapping)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Save a mapping as the active one
    Save {
        /// Mapping file (reads stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Remove the saved mapping
    Clear,
}

#[derive(Subcommand)]
pub(crate) enum PresetAction {
    /// List built-in and saved presets
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Make a preset the active mapping
    Load {
        /// Preset key
        key: String,
    },

    /// Save a mapping as a named preset
    Save {
        /// Preset key
        key: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Mapping file (defaults to the saved mapping)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete a saved preset
    Delete {
        /// Preset key
        key: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
