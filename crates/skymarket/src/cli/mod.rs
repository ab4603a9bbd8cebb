//! Command-line interface for skymarket.
//!
//! This module provides the CLI structure for the `skymarket` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ChromeCommand, ConfigCommand, LinkifyCommand, LinkifyFormat, ListingCommand, SeedCommand,
    TaxonomyCommand, TaxonomyTable, VideoCommand,
};

use crate::logging::Verbosity;

/// skymarket - Aviation classifieds marketplace tools
///
/// Inspect how message text is linkified, which page chrome a route shows,
/// the category and aircraft tables, and talk to the listing, video and
/// price-extension services.
#[derive(Debug, Parser)]
#[command(name = "skymarket")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split text into plain and link segments
    Linkify(LinkifyCommand),

    /// Show header/footer visibility for a path
    Chrome(ChromeCommand),

    /// List category and aircraft tables
    Taxonomy(TaxonomyCommand),

    /// Resolve a listing detail route
    Listing(ListingCommand),

    /// Look up YouTube video metadata
    Video(VideoCommand),

    /// Register the configured price-extension labels
    Seed(SeedCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Config(ConfigCommand::Path),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "skymarket");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_linkify() {
        let args = vec!["skymarket", "linkify", "see https://a.example", "--format", "html"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Linkify(cmd) => {
                assert_eq!(cmd.text, "see https://a.example");
                assert_eq!(cmd.format, LinkifyFormat::Html);
            }
            other => panic!("Expected Linkify, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_chrome() {
        let args = vec!["skymarket", "chrome", "/admin/messages", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Chrome(ChromeCommand { json: true, .. })));
    }

    #[test]
    fn test_parse_taxonomy_models() {
        let args = vec!["skymarket", "taxonomy", "models", "-m", "Cessna", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Taxonomy(cmd) => {
                assert!(cmd.json);
                assert!(matches!(
                    cmd.table,
                    TaxonomyTable::Models { manufacturer: Some(ref m) } if m == "Cessna"
                ));
            }
            other => panic!("Expected Taxonomy, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_listing() {
        let args = vec!["skymarket", "listing", "/listing/abc?conversation=c1", "--no-video"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Listing(ListingCommand { no_video: true, .. })));
    }

    #[test]
    fn test_parse_seed() {
        let args = vec!["skymarket", "seed", "--created-by", "ops"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Seed(cmd) => assert_eq!(cmd.created_by.as_deref(), Some("ops")),
            other => panic!("Expected Seed, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_validate() {
        let args = vec!["skymarket", "config", "validate", "--file", "/tmp/c.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["skymarket", "-c", "/custom/config.toml", "config", "path"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(vec!["skymarket", "-vv", "config", "path"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(vec!["skymarket", "video", "dQw4w9WgXcQ", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(Cli::try_parse_from(vec!["skymarket"]).is_err());
    }
}
