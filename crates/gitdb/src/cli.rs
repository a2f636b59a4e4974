//! Command line interface definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SQLite-backed commit index for local repositories
#[derive(Debug, Parser)]
#[command(name = "gitdb", version, about)]
pub struct Cli {
    /// Directory to read .env files from
    #[arg(long, global = true)]
    pub env_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Index commits from a repository into the database
    Index {
        /// Repository path (defaults to the configured repo)
        #[arg(long)]
        repo: Option<PathBuf>,
        /// Maximum number of commits to read
        #[arg(long)]
        max: Option<usize>,
    },
    /// Show the most recently authored commits
    Recent {
        /// Number of commits to show
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Search commit summaries and authors
    Search {
        /// Substring to match
        term: String,
        /// Number of commits to show
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Summary statistics for the index
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_index_with_options() {
        let cli = Cli::parse_from(["gitdb", "index", "--repo", "/tmp/repo", "--max", "50"]);
        match cli.command {
            Command::Index { repo, max } => {
                assert_eq!(repo, Some(PathBuf::from("/tmp/repo")));
                assert_eq!(max, Some(50));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn recent_defaults_its_limit() {
        let cli = Cli::parse_from(["gitdb", "recent"]);
        match cli.command {
            Command::Recent { limit } => assert_eq!(limit, 20),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn env_dir_is_global() {
        let cli = Cli::parse_from(["gitdb", "stats", "--env-dir", "/etc/gitdb"]);
        assert_eq!(cli.env_dir, Some(PathBuf::from("/etc/gitdb")));
    }
}
