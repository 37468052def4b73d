pub mod cli;
pub mod commits;
pub mod config;
pub mod error;
pub mod github;
pub mod issues;
pub mod model;
pub mod summary;
pub mod table;
pub mod util;

pub use commits::CommitCollector;
pub use config::Config;
pub use error::{MinerError, Result};
pub use issues::IssueCollector;
pub use model::{CommitRecord, IssueRecord, IssueState, RepoSlug, Schema, Table};
pub use table::RawTable;
