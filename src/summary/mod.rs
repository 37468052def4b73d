pub mod aggregate;
pub mod exec;
pub mod output;

pub use aggregate::{average_resolution, close_rate, summarize, top_contributors};
pub use exec::exec;
pub use output::{output_json, output_report};

use serde::Serialize;

pub const TOP_CONTRIBUTORS: usize = 5;
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contributor {
    pub author: String,
    pub commits: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloseRate {
    pub closed: usize,
    pub total: usize,
    pub ratio: f64,
}

impl CloseRate {
    pub fn fraction(&self) -> String {
        format!("{}/{}", self.closed, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub average_days: f64,
    pub resolved_issues: usize,
}

/// Timestamp cells that were present but could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MalformedTimestamps {
    pub commit_date: usize,
    pub issue_created_at: usize,
    pub issue_closed_at: usize,
}

impl MalformedTimestamps {
    pub fn total(&self) -> usize {
        self.commit_date + self.issue_created_at + self.issue_closed_at
    }
}

/// Outcome of one summary run. `None` sections had no usable data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub top_contributors: Option<Vec<Contributor>>,
    pub close_rate: Option<CloseRate>,
    pub average_resolution: Option<Resolution>,
    pub malformed_timestamps: MalformedTimestamps,
}
