use thiserror::Error;

pub type Result<T> = std::result::Result<T, MinerError>;

#[derive(Error, Debug)]
pub enum MinerError {
    #[error("{var} environment variable not set")]
    MissingCredential { var: &'static str },
    #[error("Invalid repository '{0}': expected owner/name")]
    InvalidRepository(String),
    #[error("Upstream API error: {0}")]
    Upstream(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MinerError {
    /// True for failures raised before any network access because of missing configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MinerError::MissingCredential { .. })
    }
}
