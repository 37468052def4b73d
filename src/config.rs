use crate::error::{MinerError, Result};

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const API_URL_VAR: &str = "GITHUB_API_URL";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings handed to the collectors for one command run.
#[derive(Debug, Clone)]
pub struct Config {
    token: Option<String>,
    api_url: String,
}

impl Config {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Read the credential and API base URL from the process environment.
    pub fn from_env() -> Self {
        let config = Self::new(std::env::var(TOKEN_VAR).ok());
        match std::env::var(API_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => config.with_api_url(url),
            _ => config,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn credential(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or(MinerError::MissingCredential { var: TOKEN_VAR })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
