//! CLI argument parsing and command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// A slim CLI for MLB teams, players, standings and live scores
#[derive(Debug, Parser)]
#[command(
    name = "mlbq",
    author,
    version,
    about = "A slim CLI for MLB teams, players, standings and live scores",
    propagate_version = true,
    after_help = "Use 'mlbq <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,
    #[command(subcommand)]
    pub command: Command,
}

/// Global options available to all commands
#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Output format (json, yaml, table, auto)
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        global = true,
        conflicts_with = "json"
    )]
    pub output_format: Option<OutputFormat>,

    /// Output as JSON (shorthand for -o json)
    #[arg(long, global = true)]
    pub json: bool,

    /// MLB Stats API base URL
    #[arg(long, value_name = "URL", env = "MLB_STATS_URL", global = true)]
    pub stats_url: Option<String>,

    /// ESPN MLB scoreboard base URL
    #[arg(long, value_name = "URL", env = "MLB_SCORES_URL", global = true)]
    pub scores_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Override config file path
    #[arg(long, value_name = "PATH", env = "MLBQ_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Reduce output to only errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase logging verbosity (stackable: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Enable debug logging (equivalent to -vv)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace logging
    #[arg(long, global = true)]
    pub trace: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Hide table headers
    #[arg(long, global = true)]
    pub no_headers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[non_exhaustive]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
    Auto,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a team by (partial) name
    Team {
        /// Team name, e.g. "red sox"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Look up a player by name or numeric id
    Player {
        /// Player name or MLB person id, e.g. "judge" or 660271
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// List all teams
    Teams {
        /// Filter by team name (fuzzy match)
        filter: Option<String>,
    },

    /// Show league standings
    Standings {
        /// Season year (defaults to config, then the current year)
        #[arg(long)]
        season: Option<String>,

        /// Comma-separated league ids (103 = AL, 104 = NL)
        #[arg(long, value_name = "IDS")]
        leagues: Option<String>,
    },

    /// Show a player's season batting line
    Stats {
        /// MLB person id
        player_id: String,

        /// Season year (defaults to config, then the current year)
        #[arg(long)]
        season: Option<String>,
    },

    /// Show today's live scores
    Scores,

    /// Interactive team/player search
    Search,

    /// Inspect and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show effective configuration
    Show,

    /// Print config file path
    Path,

    /// Get a specific configuration value
    Get {
        /// Configuration key (dot-separated path)
        key: Option<String>,
    },

    /// Reset configuration to defaults
    Reset,
}
