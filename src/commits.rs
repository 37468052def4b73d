use crate::cli::CommonArgs;
use crate::config::Config;
use crate::error::Result;
use crate::github::{GitHubClient, RepositoryApi};
use crate::model::{CommitRecord, RepoSlug, Table};
use anyhow::Context;
use log::info;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;

pub fn exec(common: CommonArgs, repo: RepoSlug, max: Option<NonZeroUsize>, out: &Path) -> anyhow::Result<()> {
    let config = common.config();
    let client = GitHubClient::new(&config).context("Failed to create GitHub client")?;
    run(&client, &config, &repo, max, out, &mut std::io::stdout().lock())
}

/// Collect commits, write them to `out`, then report the count to `report`.
pub fn run<A: RepositoryApi + ?Sized, W: Write>(
    api: &A,
    config: &Config,
    repo: &RepoSlug,
    max: Option<NonZeroUsize>,
    out: &Path,
    report: &mut W,
) -> anyhow::Result<()> {
    let commits = CommitCollector::new(api, config)
        .fetch_commits(repo, max)
        .with_context(|| format!("Failed to fetch commits for {repo}"))?;

    commits
        .save(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    writeln!(report, "Saved {} commits to {}", commits.len(), out.display())?;
    Ok(())
}

/// Pulls commit history and normalizes it into [`CommitRecord`] rows.
pub struct CommitCollector<'a, A: RepositoryApi + ?Sized> {
    api: &'a A,
    config: &'a Config,
}

impl<'a, A: RepositoryApi + ?Sized> CommitCollector<'a, A> {
    pub fn new(api: &'a A, config: &'a Config) -> Self {
        Self { api, config }
    }

    pub fn fetch_commits(&self, repo: &RepoSlug, max_count: Option<NonZeroUsize>) -> Result<Table<CommitRecord>> {
        let token = self.config.credential()?;
        info!("Fetching commits for {repo}");

        let limit = max_count.map_or(usize::MAX, NonZeroUsize::get);
        let rows = self
            .api
            .commits(repo, token)?
            .take(limit)
            .map(|item| item.map(CommitRecord::from))
            .collect::<Result<Vec<_>>>()?;

        info!("Collected {} commits for {repo}", rows.len());
        Ok(Table::new(rows))
    }
}
