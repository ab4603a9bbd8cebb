//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Linkify command arguments.
#[derive(Debug, Args)]
pub struct LinkifyCommand {
    /// Text to split into plain and link segments
    pub text: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: LinkifyFormat,
}

/// Chrome command arguments.
#[derive(Debug, Args)]
pub struct ChromeCommand {
    /// Navigation path, e.g. /admin/messages
    pub path: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Taxonomy command arguments.
#[derive(Debug, Args)]
pub struct TaxonomyCommand {
    /// Table to list
    #[command(subcommand)]
    pub table: TaxonomyTable,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub json: bool,
}

/// Taxonomy tables.
#[derive(Debug, Subcommand)]
pub enum TaxonomyTable {
    /// Listing categories and their routes
    Categories,

    /// Aircraft types
    Types,

    /// Aircraft manufacturers
    Manufacturers,

    /// Aircraft models, optionally for one manufacturer
    Models {
        /// Only list models for this manufacturer
        #[arg(short, long)]
        manufacturer: Option<String>,
    },
}

/// Listing command arguments.
#[derive(Debug, Args)]
pub struct ListingCommand {
    /// Listing route, e.g. /listing/abc123?conversation=c1
    pub path: String,

    /// Skip the video metadata lookup
    #[arg(long)]
    pub no_video: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Video command arguments.
#[derive(Debug, Args)]
pub struct VideoCommand {
    /// Video id or YouTube URL
    pub input: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Seed command arguments.
#[derive(Debug, Args)]
pub struct SeedCommand {
    /// Attribution recorded with each label (overrides configuration)
    #[arg(long, value_name = "WHO")]
    pub created_by: Option<String>,

    /// Output the report as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for the linkify command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LinkifyFormat {
    /// One segment per line
    #[default]
    Plain,
    /// JSON array of segments
    Json,
    /// HTML with anchors for links
    Html,
}
