pub mod client;
pub mod types;

pub use client::{GitHubClient, PageResponse, ReqwestTransport, Transport};
pub use types::{CommitDetail, GitIdentity, UpstreamCommit, UpstreamIssue, UpstreamUser};

use crate::error::Result;
use crate::model::{IssueState, RepoSlug};

/// Lazily paginated stream of upstream items. Iteration ends after the first error.
pub type Items<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Read access to a hosted repository's history.
///
/// Implementations own transport, authentication and pagination. The token is
/// passed per call so that callers can enforce the credential precondition
/// before any request is attempted.
pub trait RepositoryApi {
    /// Commits in upstream order (newest first on GitHub).
    fn commits<'a>(&'a self, repo: &RepoSlug, token: &str) -> Result<Items<'a, UpstreamCommit>>;

    /// Issues and pull requests, filtered server-side by `state`.
    fn issues<'a>(
        &'a self,
        repo: &RepoSlug,
        state: IssueState,
        token: &str,
    ) -> Result<Items<'a, UpstreamIssue>>;
}
