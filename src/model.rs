use crate::error::MinerError;
use crate::github::types::{UpstreamCommit, UpstreamIssue};
use crate::util::whole_days;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered column names of a persisted record type.
pub trait Schema {
    const COLUMNS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub author: Option<String>,
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

impl Schema for CommitRecord {
    const COLUMNS: &'static [&'static str] = &["sha", "author", "email", "date", "message"];
}

impl From<UpstreamCommit> for CommitRecord {
    fn from(upstream: UpstreamCommit) -> Self {
        let (author, email, date) = match upstream.commit.author {
            Some(identity) => (identity.name, identity.email, identity.date),
            None => (None, None, None),
        };

        Self {
            sha: upstream.sha,
            author,
            email,
            date,
            message: upstream.commit.message.as_deref().and_then(first_line),
        }
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn first_line(message: &str) -> Option<String> {
    let line = message.split(is_line_break).next()?;
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub id: u64,
    pub number: u64,
    pub title: Option<String>,
    pub user: Option<String>,
    pub state: String,
    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub comments: u64,
    pub open_duration_days: Option<i64>,
}

impl Schema for IssueRecord {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "number",
        "title",
        "user",
        "state",
        "created_at",
        "closed_at",
        "comments",
        "open_duration_days",
    ];
}

impl From<UpstreamIssue> for IssueRecord {
    fn from(upstream: UpstreamIssue) -> Self {
        let open_duration_days = match (upstream.created_at, upstream.closed_at) {
            (Some(created), Some(closed)) => Some(whole_days(created, closed)),
            _ => None,
        };

        Self {
            id: upstream.id,
            number: upstream.number,
            title: upstream.title,
            user: upstream.user.map(|u| u.login),
            state: upstream.state,
            created_at: upstream.created_at,
            closed_at: upstream.closed_at,
            comments: upstream.comments,
            open_duration_days,
        }
    }
}

/// Ordered sequence of records sharing one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R: Schema> Table<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoSlug {
    type Err = MinerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MinerError::InvalidRepository(s.to_string());
        let (owner, name) = s.split_once('/').ok_or_else(invalid)?;
        if !is_slug_part(owner) || !is_slug_part(name) {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Owner and repository names are restricted to characters that need no URL escaping.
fn is_slug_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Issue state filter forwarded to the upstream query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IssueState {
    #[default]
    All,
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::All => "all",
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
