//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Bucketeer - A self-emptying produce board and a department directory.
#[derive(Debug, Parser)]
#[command(name = "bucketeer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BUCKETEER_CONFIG")]
    pub config: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive board (default)
    Board(BoardArgs),

    /// Print the seed list
    Seed(SeedArgs),

    /// Fetch users and show them grouped by department
    Directory(DirectoryArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the board command.
#[derive(Debug, Default, Parser)]
pub struct BoardArgs {
    /// Auto-revert delay in milliseconds
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// JSON seed file (`[{"type": "Fruit", "name": "Apple"}, ...]`)
    #[arg(short, long)]
    pub seed: Option<PathBuf>,
}

/// Arguments for the seed command.
#[derive(Debug, Parser)]
pub struct SeedArgs {
    /// Show this seed file instead of the built-in list
    #[arg(short, long)]
    pub seed: Option<PathBuf>,
}

/// Arguments for the directory command.
#[derive(Debug, Parser)]
pub struct DirectoryArgs {
    /// Case-insensitive search over name, email, company and title
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show this department ("all" for every department)
    #[arg(short, long)]
    pub department: Option<String>,

    /// Sort departments Z to A
    #[arg(long)]
    pub desc: bool,

    /// API base URL
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Number of users to fetch
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Show per-department totals instead of every user
    #[arg(long)]
    pub summary: bool,

    /// List department names only
    #[arg(long, conflicts_with = "summary")]
    pub departments: bool,
}

/// Arguments for config management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["bucketeer"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_board_command() {
        let cli = Cli::parse_from(["bucketeer", "board", "--delay-ms", "1500"]);
        match cli.command {
            Some(Command::Board(args)) => {
                assert_eq!(args.delay_ms, Some(1500));
                assert!(args.seed.is_none());
            }
            _ => panic!("Expected Board command"),
        }
    }

    #[test]
    fn test_directory_command() {
        let cli = Cli::parse_from([
            "bucketeer",
            "directory",
            "--search",
            "manager",
            "--department",
            "Engineering",
            "--desc",
            "--format",
            "json",
        ]);
        assert_eq!(cli.format, Some(CliFormat::Json));
        match cli.command {
            Some(Command::Directory(args)) => {
                assert_eq!(args.search.as_deref(), Some("manager"));
                assert_eq!(args.department.as_deref(), Some("Engineering"));
                assert!(args.desc);
                assert!(!args.summary);
            }
            _ => panic!("Expected Directory command"),
        }
    }

    #[test]
    fn test_summary_conflicts_with_departments() {
        let result = Cli::try_parse_from(["bucketeer", "directory", "--summary", "--departments"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["bucketeer", "seed", "-vv", "--no-color"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["bucketeer", "config", "init", "--force"]);
        match cli.command {
            Some(Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            })) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }
    }
}
