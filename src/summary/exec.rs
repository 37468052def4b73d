use super::{output_json, output_report, summarize};
use crate::table::RawTable;
use anyhow::Context;
use std::path::Path;

pub fn exec(commits: &Path, issues: &Path, json: bool) -> anyhow::Result<()> {
    let commit_table = RawTable::load(commits)
        .with_context(|| format!("Failed to read commits from {}", commits.display()))?;
    let issue_table = RawTable::load(issues)
        .with_context(|| format!("Failed to read issues from {}", issues.display()))?;

    let report = summarize(&commit_table, &issue_table);

    if json {
        output_json(&report)?;
    } else {
        output_report(&report)?;
    }

    Ok(())
}
