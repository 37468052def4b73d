#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use repo_miner::github::{
    CommitDetail, GitIdentity, Items, RepositoryApi, UpstreamCommit, UpstreamIssue, UpstreamUser,
};
use repo_miner::{IssueState, MinerError, RepoSlug, Result};
use std::cell::{Cell, RefCell};

/// In-memory stand-in for the hosting API.
#[derive(Default)]
pub struct FakeApi {
    pub commits: Vec<UpstreamCommit>,
    pub issues: Vec<UpstreamIssue>,
    /// Yield an upstream error after this many items.
    pub fail_after: Option<usize>,
    pub calls: Cell<usize>,
    pub tokens: RefCell<Vec<String>>,
    pub pulled: Cell<usize>,
}

impl FakeApi {
    pub fn with_commits(commits: Vec<UpstreamCommit>) -> Self {
        Self { commits, ..Default::default() }
    }

    pub fn with_issues(issues: Vec<UpstreamIssue>) -> Self {
        Self { issues, ..Default::default() }
    }

    fn stream<'a, T: Clone + 'a>(&'a self, items: Vec<T>, token: &str) -> Items<'a, T> {
        self.calls.set(self.calls.get() + 1);
        self.tokens.borrow_mut().push(token.to_string());
        let fail_after = self.fail_after;
        let mut items = items.into_iter().enumerate();
        Box::new(std::iter::from_fn(move || {
            if let Some(n) = fail_after {
                let (i, item) = items.next()?;
                if i >= n {
                    return Some(Err(MinerError::Upstream("HTTP 502 Bad Gateway".into())));
                }
                self.pulled.set(self.pulled.get() + 1);
                return Some(Ok(item));
            }
            let (_, item) = items.next()?;
            self.pulled.set(self.pulled.get() + 1);
            Some(Ok(item))
        }))
    }
}

impl RepositoryApi for FakeApi {
    fn commits<'a>(&'a self, _repo: &RepoSlug, token: &str) -> Result<Items<'a, UpstreamCommit>> {
        Ok(self.stream(self.commits.clone(), token))
    }

    fn issues<'a>(&'a self, _repo: &RepoSlug, state: IssueState, token: &str) -> Result<Items<'a, UpstreamIssue>> {
        let issues = self
            .issues
            .iter()
            .filter(|i| state == IssueState::All || i.state == state.as_str())
            .cloned()
            .collect();
        Ok(self.stream(issues, token))
    }
}

pub fn repo() -> RepoSlug {
    "any/repo".parse().unwrap()
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn commit(sha: &str, author: &str, email: &str, date: DateTime<Utc>, message: &str) -> UpstreamCommit {
    UpstreamCommit {
        sha: sha.to_string(),
        commit: CommitDetail {
            author: Some(GitIdentity {
                name: Some(author.to_string()),
                email: Some(email.to_string()),
                date: Some(date),
            }),
            message: Some(message.to_string()),
        },
    }
}

pub fn issue(
    id: u64,
    number: u64,
    title: &str,
    user: &str,
    state: &str,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    comments: u64,
) -> UpstreamIssue {
    UpstreamIssue {
        id,
        number,
        title: Some(title.to_string()),
        user: Some(UpstreamUser { login: user.to_string() }),
        state: state.to_string(),
        created_at: Some(created_at),
        closed_at,
        comments,
        pull_request: None,
    }
}

pub fn pull_request(mut item: UpstreamIssue) -> UpstreamIssue {
    item.pull_request = Some(serde_json::json!({ "url": "https://api.github.com/repos/any/repo/pulls/1" }));
    item
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}
