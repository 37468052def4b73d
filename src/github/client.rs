use super::{Items, RepositoryApi, UpstreamCommit, UpstreamIssue};
use crate::config::Config;
use crate::error::{MinerError, Result};
use crate::model::{IssueState, RepoSlug};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LINK};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::time::Duration;

const PER_PAGE: u32 = 100;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const API_VERSION: &str = "2022-11-28";

/// One undecoded page as returned by the server.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    /// Raw `Link` header, if any.
    pub link: Option<String>,
    pub body: String,
}

/// HTTP transport abstraction for dependency injection.
pub trait Transport {
    /// Perform an authenticated GET and return status, `Link` header and body.
    fn get(&self, url: &str, token: &str) -> Result<PageResponse>;
}

/// Production transport using blocking reqwest.
///
/// Everything above this type is exercised with an in-memory transport.
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = Client::builder()
            .user_agent(concat!("repo-miner/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http })
    }
}

#[cfg(not(tarpaulin_include))]
impl Transport for ReqwestTransport {
    fn get(&self, url: &str, token: &str) -> Result<PageResponse> {
        let response = self.http.get(url).bearer_auth(token).send()?;
        let status = response.status().as_u16();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;
        Ok(PageResponse { status, link, body })
    }
}

/// GitHub REST client: URL building, pagination and decoding over a [`Transport`].
pub struct GitHubClient {
    transport: Box<dyn Transport>,
    base_url: String,
    progress: bool,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }

    pub fn with_transport(config: &Config, transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            base_url: config.api_url().to_string(),
            progress: true,
        }
    }

    /// Show a spinner on stderr while pages are fetched.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    fn pages<T: DeserializeOwned + 'static>(&self, url: String, token: &str, label: &'static str) -> Items<'_, T> {
        let pb = if self.progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Fetching {label}..."));
            pb
        } else {
            ProgressBar::hidden()
        };

        Box::new(Pages {
            client: self,
            token: token.to_string(),
            next: Some(url),
            buffer: VecDeque::new(),
            fetched: 0,
            label,
            pb,
        })
    }

    fn get_page<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<(Vec<T>, Option<String>)> {
        debug!("GET {url}");
        let response = self.transport.get(url, token)?;
        decode_page(url, response)
    }

    fn repo_url(&self, repo: &RepoSlug, resource: &str) -> String {
        format!("{}/repos/{}/{}/{resource}", self.base_url, repo.owner(), repo.name())
    }
}

fn decode_page<T: DeserializeOwned>(url: &str, response: PageResponse) -> Result<(Vec<T>, Option<String>)> {
    if !(200..300).contains(&response.status) {
        return Err(MinerError::Upstream(format!(
            "GET {url} returned HTTP {}: {}",
            response.status,
            response.body.trim()
        )));
    }

    let next = response.link.as_deref().and_then(next_link);
    let items = serde_json::from_str::<Vec<T>>(&response.body)?;
    Ok((items, next))
}

impl RepositoryApi for GitHubClient {
    fn commits<'a>(&'a self, repo: &RepoSlug, token: &str) -> Result<Items<'a, UpstreamCommit>> {
        let url = format!("{}?per_page={PER_PAGE}", self.repo_url(repo, "commits"));
        Ok(self.pages(url, token, "commits"))
    }

    fn issues<'a>(
        &'a self,
        repo: &RepoSlug,
        state: IssueState,
        token: &str,
    ) -> Result<Items<'a, UpstreamIssue>> {
        let url = format!(
            "{}?state={}&per_page={PER_PAGE}",
            self.repo_url(repo, "issues"),
            state.as_str()
        );
        Ok(self.pages(url, token, "issues"))
    }
}

struct Pages<'a, T> {
    client: &'a GitHubClient,
    token: String,
    next: Option<String>,
    buffer: VecDeque<T>,
    fetched: usize,
    label: &'static str,
    pb: ProgressBar,
}

impl<T: DeserializeOwned> Iterator for Pages<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }

            let Some(url) = self.next.take() else {
                self.pb.finish_and_clear();
                return None;
            };

            match self.client.get_page::<T>(&url, &self.token) {
                Ok((items, next)) => {
                    self.fetched += items.len();
                    self.pb.set_message(format!("Fetched {} {}", self.fetched, self.label));
                    self.pb.tick();
                    self.buffer.extend(items);
                    self.next = next;
                }
                Err(e) => {
                    self.pb.abandon();
                    return Some(Err(e));
                }
            }
        }
    }
}

// Callers may stop early (e.g. a record cap), so the spinner is cleared here too.
impl<T> Drop for Pages<'_, T> {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

/// Extract the `rel="next"` target from a `Link` response header.
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut sections = part.split(';');
        let target = sections.next()?.trim();
        let is_next = sections.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
