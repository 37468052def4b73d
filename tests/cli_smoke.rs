use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const COMMITS_CSV: &str = "sha,author,email,date,message
sha1,Alice,a@example.com,2024-05-01T10:00:00Z,Initial commit
sha2,Bob,b@example.com,2024-05-02T10:00:00Z,Bug fix
sha3,Alice,a@example.com,2024-05-03T10:00:00Z,Docs
";

const ISSUES_CSV: &str = "id,number,title,user,state,created_at,closed_at,comments,open_duration_days
1,101,Bug in login,alice,closed,2024-05-01T00:00:00Z,2024-05-06T00:00:00Z,5,5
2,102,Fix typo,bob,open,2024-05-02T00:00:00Z,,2,
3,103,Crash,carol,closed,2024-05-01T00:00:00Z,2024-05-02T00:00:00Z,0,1
";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn miner() -> Command {
    let mut cmd = Command::cargo_bin("repo-miner").unwrap();
    cmd.env_remove("GITHUB_TOKEN").env_remove("RUST_LOG");
    cmd
}

#[test]
fn summarize_prints_report() {
    let dir = tempdir().unwrap();
    let commits = write(dir.path(), "commits.csv", COMMITS_CSV);
    let issues = write(dir.path(), "issues.csv", ISSUES_CSV);

    let out = miner()
        .arg("summarize")
        .arg("--commits")
        .arg(&commits)
        .arg("--issues")
        .arg(&issues)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Top Contributors"));
    assert!(text.contains("Alice"));
    assert!(text.contains("0.67"));
    assert!(text.contains("2/3"));
    assert!(text.contains("3.00 days"));
}

#[test]
fn summarize_json_is_parseable() {
    let dir = tempdir().unwrap();
    let commits = write(dir.path(), "commits.csv", COMMITS_CSV);
    let issues = write(dir.path(), "issues.csv", "id,number,title,user,state,created_at,closed_at,comments,open_duration_days\n");

    let out = miner()
        .arg("summarize")
        .arg("--commits")
        .arg(&commits)
        .arg("--issues")
        .arg(&issues)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["top_contributors"][0]["author"], "Alice");
    assert_eq!(v["top_contributors"][0]["commits"], 2);
    assert!(v["close_rate"].is_null());
    assert!(v["average_resolution"].is_null());
}

#[test]
fn summarize_missing_file_fails() {
    let dir = tempdir().unwrap();
    let issues = write(dir.path(), "issues.csv", ISSUES_CSV);

    miner()
        .arg("summarize")
        .arg("--commits")
        .arg(dir.path().join("absent.csv"))
        .arg("--issues")
        .arg(&issues)
        .assert()
        .failure();
}

#[test]
fn fetch_commits_without_token_fails() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("commits.csv");

    let output = miner()
        .args(["fetch-commits", "--repo", "octo/widgets", "--out"])
        .arg(&out_path)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    assert!(String::from_utf8_lossy(&output).contains("GITHUB_TOKEN"));
    assert!(!out_path.exists());
}

#[test]
fn fetch_issues_rejects_bad_arguments() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("issues.csv");

    miner()
        .args(["fetch-issues", "--repo", "not-a-slug", "--out"])
        .arg(&out_path)
        .assert()
        .failure();

    miner()
        .args(["fetch-issues", "--repo", "octo/widgets", "--state", "merged", "--out"])
        .arg(&out_path)
        .assert()
        .failure();

    miner()
        .args(["fetch-issues", "--repo", "octo/widgets", "--max", "0", "--out"])
        .arg(&out_path)
        .assert()
        .failure();
}
