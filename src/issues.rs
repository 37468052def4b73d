use crate::cli::CommonArgs;
use crate::config::Config;
use crate::error::Result;
use crate::github::{GitHubClient, RepositoryApi};
use crate::model::{IssueRecord, IssueState, RepoSlug, Table};
use anyhow::Context;
use log::{debug, info};
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;

pub fn exec(
    common: CommonArgs,
    repo: RepoSlug,
    state: IssueState,
    max: Option<NonZeroUsize>,
    out: &Path,
) -> anyhow::Result<()> {
    let config = common.config();
    let client = GitHubClient::new(&config).context("Failed to create GitHub client")?;
    run(&client, &config, &repo, state, max, out, &mut std::io::stdout().lock())
}

/// Collect issues, write them to `out`, then report the count to `report`.
pub fn run<A: RepositoryApi + ?Sized, W: Write>(
    api: &A,
    config: &Config,
    repo: &RepoSlug,
    state: IssueState,
    max: Option<NonZeroUsize>,
    out: &Path,
    report: &mut W,
) -> anyhow::Result<()> {
    let issues = IssueCollector::new(api, config)
        .fetch_issues(repo, state, max)
        .with_context(|| format!("Failed to fetch issues for {repo}"))?;

    issues
        .save(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    writeln!(report, "Saved {} issues to {}", issues.len(), out.display())?;
    Ok(())
}

/// Pulls issue history, skipping pull requests, into [`IssueRecord`] rows.
pub struct IssueCollector<'a, A: RepositoryApi + ?Sized> {
    api: &'a A,
    config: &'a Config,
}

impl<'a, A: RepositoryApi + ?Sized> IssueCollector<'a, A> {
    pub fn new(api: &'a A, config: &'a Config) -> Self {
        Self { api, config }
    }

    pub fn fetch_issues(
        &self,
        repo: &RepoSlug,
        state: IssueState,
        max_count: Option<NonZeroUsize>,
    ) -> Result<Table<IssueRecord>> {
        let token = self.config.credential()?;
        info!("Fetching {state} issues for {repo}");

        // Pull requests are dropped before the cap so they never use up the budget.
        let limit = max_count.map_or(usize::MAX, NonZeroUsize::get);
        let rows = self
            .api
            .issues(repo, state, token)?
            .filter(|item| match item {
                Ok(issue) if issue.is_pull_request() => {
                    debug!("Skipping pull request #{}", issue.number);
                    false
                }
                _ => true,
            })
            .take(limit)
            .map(|item| item.map(IssueRecord::from))
            .collect::<Result<Vec<_>>>()?;

        info!("Collected {} issues for {repo}", rows.len());
        Ok(Table::new(rows))
    }
}
