//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::cli::commands::boards::BoardsArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::filters::FiltersArgs;
use crate::core::config::{AuthMode, PartialConfig};

/// Jira Cleanup - list JIRA filters and boards, pick some by range, delete them
#[derive(Parser, Debug)]
#[command(name = "jcl", version, about, long_about = None)]
#[command(after_help = "\
Range selection examples (at the selection prompt):
  3           one item
  1-5         items 1 through 5
  2,4,7       items 2, 4 and 7
  1-3,6-8,10  combined

Credentials come from --url/--username/--token, the environment
(JIRA_URL, JIRA_USERNAME, JIRA_API_TOKEN; a .env file is read too),
or the config file (~/.config/jira-cleanup/config.yaml).")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List your filters and delete a selection of them
    Filters(FiltersArgs),

    /// List boards and delete a selection of them
    Boards(BoardsArgs),

    /// Check the connection and which authentication method works
    Auth,

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// JIRA base URL (e.g., https://company.atlassian.net)
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// JIRA username or email
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// API token or Personal Access Token
    #[arg(long, global = true, hide = true)]
    pub token: Option<String>,

    /// Authentication method
    #[arg(long, value_enum, global = true)]
    pub auth: Option<AuthMode>,

    /// Config file (default: user config dir/jira-cleanup/config.yaml)
    #[arg(long, global = true, env = "JCL_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// More log output (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl GlobalOpts {
    /// Command-line layer of the configuration
    pub fn overrides(&self) -> PartialConfig {
        PartialConfig {
            url: self.url.clone(),
            username: self.username.clone(),
            token: self.token.clone(),
            auth: self.auth,
            board_filter: None,
            timeout_secs: self.timeout,
        }
    }

    /// Log level for this crate from -v/-q
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::OFF;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
