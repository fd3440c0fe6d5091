//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// zoomkit - Zoom meetings and recordings from the command line
#[derive(Debug, Parser)]
#[command(name = "zoomkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ZOOMKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List upcoming meetings
    Upcoming {
        /// Ignore cached results
        #[arg(long)]
        skip_cache: bool,
    },

    /// List cloud recordings in a date range
    Recordings {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        from: String,

        /// Last day, YYYY-MM-DD
        #[arg(long)]
        to: String,

        /// Ignore cached results
        #[arg(long)]
        skip_cache: bool,
    },

    /// Requests cache commands
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Drop every cached response
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Validate configuration
    Check,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_parse_recordings() {
        let cli = Cli::try_parse_from([
            "zoomkit",
            "recordings",
            "--from",
            "2023-01-01",
            "--to",
            "2023-03-01",
            "--skip-cache",
        ])
        .unwrap();

        match cli.command {
            Command::Recordings {
                from,
                to,
                skip_cache,
            } => {
                assert_eq!(from, "2023-01-01");
                assert_eq!(to, "2023-03-01");
                assert!(skip_cache);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_recordings_requires_dates() {
        assert!(Cli::try_parse_from(["zoomkit", "recordings", "--from", "2023-01-01"]).is_err());
    }

    #[test]
    fn test_parse_cache_clear() {
        let cli = Cli::try_parse_from(["zoomkit", "cache", "clear"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Cache {
                action: CacheAction::Clear
            }
        ));
    }
}
