use super::{CloseRate, Contributor, MalformedTimestamps, Report, Resolution, TOP_CONTRIBUTORS, UNKNOWN_AUTHOR};
use crate::table::RawTable;
use crate::util::{parse_timestamp, whole_days};
use chrono::{DateTime, Utc};
use log::warn;
use std::collections::HashMap;

pub fn summarize(commits: &RawTable, issues: &RawTable) -> Report {
    let mut malformed = MalformedTimestamps::default();

    let (_, bad) = normalize_column(commits, "date");
    malformed.commit_date = bad;
    let (created, bad) = normalize_column(issues, "created_at");
    malformed.issue_created_at = bad;
    let (closed, bad) = normalize_column(issues, "closed_at");
    malformed.issue_closed_at = bad;

    Report {
        top_contributors: top_contributors(commits, TOP_CONTRIBUTORS),
        close_rate: close_rate(issues),
        average_resolution: average_resolution(created.as_deref(), closed.as_deref()),
        malformed_timestamps: malformed,
    }
}

/// Parse a timestamp column; unparseable cells become `None` and are counted.
fn normalize_column(table: &RawTable, name: &str) -> (Option<Vec<Option<DateTime<Utc>>>>, usize) {
    let Some(cells) = table.column(name) else {
        return (None, 0);
    };

    let mut bad = 0;
    let parsed: Vec<Option<DateTime<Utc>>> = cells
        .enumerate()
        .map(|(row, cell)| {
            let cell = cell?;
            let ts = parse_timestamp(cell);
            if ts.is_none() {
                warn!("Ignoring malformed {name} in row {}: {cell:?}", row + 1);
                bad += 1;
            }
            ts
        })
        .collect();
    (Some(parsed), bad)
}

/// Commit counts per author, largest first. Ties keep first-appearance order.
pub fn top_contributors(commits: &RawTable, limit: usize) -> Option<Vec<Contributor>> {
    if commits.is_empty() {
        return None;
    }
    let authors = commits.column("author")?;

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<Contributor> = Vec::new();
    for author in authors {
        let author = author.unwrap_or(UNKNOWN_AUTHOR);
        match index.get(author).copied() {
            Some(i) => counts[i].commits += 1,
            None => {
                index.insert(author, counts.len());
                counts.push(Contributor {
                    author: author.to_string(),
                    commits: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.commits.cmp(&a.commits));
    counts.truncate(limit);
    Some(counts)
}

/// Share of rows whose state is "closed", over all rows.
pub fn close_rate(issues: &RawTable) -> Option<CloseRate> {
    if issues.is_empty() {
        return None;
    }
    let states = issues.column("state")?;

    let mut closed = 0;
    let mut total = 0;
    for state in states {
        total += 1;
        if state.is_some_and(|s| s.trim().eq_ignore_ascii_case("closed")) {
            closed += 1;
        }
    }

    let ratio = if total == 0 { 0.0 } else { closed as f64 / total as f64 };
    Some(CloseRate { closed, total, ratio })
}

/// Mean whole-day open duration over rows with both timestamps.
pub fn average_resolution(
    created: Option<&[Option<DateTime<Utc>>]>,
    closed: Option<&[Option<DateTime<Utc>>]>,
) -> Option<Resolution> {
    let (created, closed) = (created?, closed?);

    let days: Vec<i64> = created
        .iter()
        .zip(closed)
        .filter_map(|pair| match pair {
            (Some(start), Some(end)) => Some(whole_days(*start, *end)),
            _ => None,
        })
        .collect();

    if days.is_empty() {
        return None;
    }

    Some(Resolution {
        average_days: days.iter().sum::<i64>() as f64 / days.len() as f64,
        resolved_issues: days.len(),
    })
}
