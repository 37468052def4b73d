use crate::config::Config;
use crate::model::{IssueState, RepoSlug};
use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repo-miner")]
#[command(about = "Fetch GitHub commits/issues and summarize them")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(short, long, action = ArgAction::Count, global = true, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(long, global = true, help = "GitHub API base URL (overrides GITHUB_API_URL)")]
    pub api_url: Option<String>,
}

impl CommonArgs {
    pub fn config(&self) -> Config {
        let config = Config::from_env();
        match &self.api_url {
            Some(url) => config.with_api_url(url.as_str()),
            None => config,
        }
    }

    /// `None` defers to `RUST_LOG`.
    pub fn log_level(&self) -> Option<LevelFilter> {
        match self.verbose {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch commits and save to CSV
    FetchCommits {
        #[arg(long, help = "Repository in owner/repo format")]
        repo: RepoSlug,

        #[arg(long, help = "Max number of commits to fetch")]
        max: Option<NonZeroUsize>,

        #[arg(long, help = "Path to output commits CSV")]
        out: PathBuf,
    },
    /// Fetch issues (excluding pull requests) and save to CSV
    FetchIssues {
        #[arg(long, help = "Repository in owner/repo format")]
        repo: RepoSlug,

        #[arg(long, value_enum, default_value_t = IssueState::All, help = "Issue state filter")]
        state: IssueState,

        #[arg(long, help = "Max number of issues to fetch")]
        max: Option<NonZeroUsize>,

        #[arg(long, help = "Path to output issues CSV")]
        out: PathBuf,
    },
    /// Summarize commits and issues CSV files
    Summarize {
        #[arg(long, help = "Path to commits CSV")]
        commits: PathBuf,

        #[arg(long, help = "Path to issues CSV")]
        issues: PathBuf,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn init_logging(&self) {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
        if let Some(level) = self.common.log_level() {
            builder.filter_level(level);
        }
        let _ = builder.format_timestamp(None).try_init();
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::FetchCommits { repo, max, out } => crate::commits::exec(self.common, repo, max, &out),
            Commands::FetchIssues { repo, state, max, out } => {
                crate::issues::exec(self.common, repo, state, max, &out)
            }
            Commands::Summarize { commits, issues, json } => crate::summary::exec(&commits, &issues, json),
        }
    }
}
