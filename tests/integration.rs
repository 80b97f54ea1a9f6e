// Integration tests for the commitscore CLI.
//
// These tests use assert_cmd to invoke the binary against a temporary
// working directory and verify exit codes, stdout/stderr output, and the
// persisted store snapshot.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn commitscore(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("commitscore").expect("binary should exist");
    cmd.arg("--dir").arg(dir);
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command should run");
    assert!(output.status.success(), "command should succeed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout should be json")
}

fn raw_commit(sha: &str, message: &str, additions: u64, deletions: u64, files: usize) -> Value {
    let files = (0..files)
        .map(|index| json!({ "filename": format!("src/file{index}.rs") }))
        .collect::<Vec<_>>();
    json!({
        "sha": sha,
        "commit": {
            "message": message,
            "author": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "date": "2024-03-05T10:00:00Z"
            }
        },
        "author": { "login": "jane", "id": 7 },
        "stats": { "additions": additions, "deletions": deletions, "total": additions + deletions },
        "files": files
    })
}

fn write_export(dir: &Path) {
    let export_dir = dir.join("exports").join("acme").join("api");
    fs::create_dir_all(&export_dir).expect("export dir should create");
    let commits = json!([
        raw_commit("a1b2c3d4e5f6", "feat(api): add pagination support", 30, 10, 3),
        raw_commit("f6e5d4c3b2a1", "refactor: cleanup unused imports", 5, 3, 1),
    ]);
    fs::write(export_dir.join("commits.json"), commits.to_string())
        .expect("export should write");
}

fn register_and_import(dir: &Path) {
    commitscore(dir)
        .args(["repo", "add", "--id", "42", "--owner", "acme", "--name", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("repository acme/api registered as"));
    write_export(dir);
    commitscore(dir)
        .args(["import", "--repository-id", "42", "--owner", "acme", "--repo", "api"])
        .args(["--source", "exports", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"imported\": 2"));
}

#[test]
fn cli_version_flag() {
    Command::cargo_bin("commitscore")
        .expect("binary should exist")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("commitscore"));
}

#[test]
fn show_commands_require_an_id() {
    Command::cargo_bin("commitscore")
        .expect("binary should exist")
        .args(["developer", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn score_prints_breakdown_as_json() {
    let dir = TempDir::new().expect("temp dir should be created");
    let score = stdout_json(commitscore(dir.path()).args([
        "score",
        "--additions",
        "30",
        "--deletions",
        "10",
        "--files",
        "3",
        "--message",
        "feat(api): add pagination support",
        "-f",
        "json",
    ]));
    assert_eq!(score["score"], 80);
    assert_eq!(score["breakdown"]["linesScore"], 10);
    assert_eq!(score["breakdown"]["filesScore"], 10);
    assert_eq!(score["breakdown"]["messageScore"], 10);
}

#[test]
fn score_defaults_to_markdown() {
    let dir = TempDir::new().expect("temp dir should be created");
    commitscore(dir.path())
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 50"));
}

#[test]
fn import_is_idempotent_across_runs() {
    let dir = TempDir::new().expect("temp dir should be created");
    register_and_import(dir.path());

    let outcome = stdout_json(commitscore(dir.path()).args([
        "import",
        "--repository-id",
        "42",
        "--owner",
        "acme",
        "--repo",
        "api",
        "--source",
        "exports",
        "-f",
        "json",
    ]));
    assert_eq!(outcome["imported"], 0);
    assert_eq!(outcome["skipped"], 2);
    assert_eq!(outcome["skips"][0]["reason"], "already_imported");

    let stats = stdout_json(commitscore(dir.path()).args(["stats", "-f", "json"]));
    assert_eq!(stats["totalCommits"], 2);
    assert_eq!(stats["totalDevelopers"], 1);
    assert_eq!(stats["totalRepositories"], 1);

    commitscore(dir.path())
        .args(["repo", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/api"));
    assert!(dir.path().join(".commitscore/store.json").exists());
}

#[test]
fn import_skips_commits_for_unregistered_repository() {
    let dir = TempDir::new().expect("temp dir should be created");
    write_export(dir.path());

    let outcome = stdout_json(commitscore(dir.path()).args([
        "import",
        "--repository-id",
        "99",
        "--owner",
        "acme",
        "--repo",
        "api",
        "--source",
        "exports",
        "-f",
        "json",
    ]));
    assert_eq!(outcome["imported"], 0);
    assert_eq!(outcome["skips"][0]["reason"], "unknown_repository");
}

#[test]
fn import_with_missing_export_exits_with_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    commitscore(dir.path())
        .args(["repo", "add", "--id", "42", "--owner", "acme", "--name", "api"])
        .assert()
        .success();
    commitscore(dir.path())
        .args(["import", "--repository-id", "42", "--owner", "acme", "--repo", "api"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("commit source error"));
}

#[test]
fn analysis_reports_summary_and_bands() {
    let dir = TempDir::new().expect("temp dir should be created");
    register_and_import(dir.path());

    let analysis = stdout_json(commitscore(dir.path()).args(["analysis", "-f", "json"]));
    assert_eq!(analysis["summary"]["totalCommits"], 2);
    assert_eq!(analysis["summary"]["avgScore"], 79);
    let bands = analysis["distribution"]
        .as_array()
        .expect("distribution should be an array");
    assert_eq!(bands.len(), 4);
    assert_eq!(bands[1]["label"], "Average");
    assert_eq!(bands[1]["count"], 0);
    assert_eq!(bands[2]["label"], "Good");
    assert_eq!(bands[2]["count"], 2);
    assert_eq!(bands[2]["percentage"], 100);

    let filtered = stdout_json(commitscore(dir.path()).args([
        "analysis",
        "--since",
        "2025-01-01",
        "-f",
        "json",
    ]));
    assert_eq!(filtered["summary"]["totalCommits"], 0);
}

#[test]
fn trend_and_top_cover_imported_history() {
    let dir = TempDir::new().expect("temp dir should be created");
    register_and_import(dir.path());

    let trend = stdout_json(
        commitscore(dir.path()).args(["trend", "--months", "1200", "-f", "json"]),
    );
    assert_eq!(trend[0]["month"], "2024-03");
    assert_eq!(trend[0]["commits"], 2);

    let top = stdout_json(commitscore(dir.path()).args([
        "top",
        "--window-days",
        "100000",
        "-f",
        "json",
    ]));
    assert_eq!(top[0]["username"], "jane");
    assert_eq!(top[0]["avgScore"], 79);

    let recent = stdout_json(
        commitscore(dir.path()).args(["recent", "--limit", "1", "-f", "json"]),
    );
    assert_eq!(recent.as_array().map(Vec::len), Some(1));
    assert_eq!(recent[0]["repository"], "api");
}

#[test]
fn team_workflow_links_members_and_repositories() {
    let dir = TempDir::new().expect("temp dir should be created");
    register_and_import(dir.path());

    let developers = stdout_json(commitscore(dir.path()).args([
        "developer",
        "list",
        "--search",
        "JAN",
        "-f",
        "json",
    ]));
    assert_eq!(developers.as_array().map(Vec::len), Some(1));
    assert_eq!(developers[0]["commitCount"], 2);
    assert_eq!(developers[0]["avgScore"], 79);
    let developer_id = developers[0]["id"]
        .as_str()
        .expect("developer id")
        .to_string();

    let output = commitscore(dir.path())
        .args(["team", "add", "--name", "Platform"])
        .output()
        .expect("team add should run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout should be utf-8");
    let team_id = stdout
        .split_whitespace()
        .last()
        .expect("team id should be printed")
        .to_string();

    commitscore(dir.path())
        .args(["team", "member", "--team", &team_id, "--developer", &developer_id])
        .args(["--role", "lead"])
        .assert()
        .success();

    let developer = stdout_json(commitscore(dir.path()).args([
        "developer",
        "show",
        &developer_id,
        "-f",
        "json",
    ]));
    assert_eq!(developer["teamIds"][0], team_id.as_str());
    assert_eq!(developer["metrics"]["totalCommits"], 2);

    let team = stdout_json(commitscore(dir.path()).args(["team", "show", &team_id, "-f", "json"]));
    assert_eq!(team["metrics"]["memberCount"], 1);
    assert_eq!(team["metrics"]["avgScore"], 79);
    assert_eq!(team["members"][0]["role"], "lead");

    let teams = stdout_json(commitscore(dir.path()).args(["team", "list", "-f", "json"]));
    assert_eq!(teams.as_array().map(Vec::len), Some(1));
    assert_eq!(teams[0]["avgScore"], 79);
    assert_eq!(teams[0]["memberCount"], 1);

    let listed = stdout_json(commitscore(dir.path()).args(["developer", "list", "-f", "json"]));
    assert_eq!(listed[0]["teams"][0]["name"], "Platform");
}

#[test]
fn developer_search_without_match_is_empty() {
    let dir = TempDir::new().expect("temp dir should be created");
    register_and_import(dir.path());
    let developers = stdout_json(commitscore(dir.path()).args([
        "developer",
        "list",
        "--search",
        "nobody",
        "-f",
        "json",
    ]));
    assert_eq!(developers.as_array().map(Vec::len), Some(0));
}

#[test]
fn commits_listing_filters_and_limits() {
    let dir = TempDir::new().expect("temp dir should be created");
    let repository = stdout_json(commitscore(dir.path()).args([
        "repo", "add", "--id", "42", "--owner", "acme", "--name", "api", "-f", "json",
    ]));
    let repository_id = repository["id"].as_str().expect("repository id").to_string();
    write_export(dir.path());
    commitscore(dir.path())
        .args(["import", "--repository-id", "42", "--owner", "acme", "--repo", "api"])
        .args(["--source", "exports"])
        .assert()
        .success();

    let all = stdout_json(commitscore(dir.path()).args([
        "commits",
        "--repository",
        &repository_id,
        "-f",
        "json",
    ]));
    assert_eq!(all.as_array().map(Vec::len), Some(2));
    assert_eq!(all[0]["developer"], "jane");
    assert_eq!(all[0]["repository"], "api");

    let limited = stdout_json(
        commitscore(dir.path()).args(["commits", "--limit", "1", "-f", "json"]),
    );
    assert_eq!(limited.as_array().map(Vec::len), Some(1));

    let before = stdout_json(commitscore(dir.path()).args([
        "commits",
        "--until",
        "2024-01-01",
        "-f",
        "json",
    ]));
    assert_eq!(before.as_array().map(Vec::len), Some(0));

    let other_repo = stdout_json(commitscore(dir.path()).args([
        "commits",
        "--repository",
        "unknown",
        "-f",
        "json",
    ]));
    assert_eq!(other_repo.as_array().map(Vec::len), Some(0));
}

#[test]
fn team_add_renders_json_when_asked() {
    let dir = TempDir::new().expect("temp dir should be created");
    let team = stdout_json(commitscore(dir.path()).args([
        "team",
        "add",
        "--name",
        "Platform",
        "--description",
        "Core services",
        "-f",
        "json",
    ]));
    assert_eq!(team["name"], "Platform");
    assert!(team["id"].as_str().is_some());
}

#[test]
fn unknown_role_is_rejected() {
    let dir = TempDir::new().expect("temp dir should be created");
    commitscore(dir.path())
        .args(["team", "add", "--name", "Platform"])
        .assert()
        .success();
    commitscore(dir.path())
        .args(["team", "member", "--team", "x", "--developer", "y", "--role", "owner"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn unknown_developer_exits_with_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    commitscore(dir.path())
        .args(["developer", "show", "missing"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("developer not found: missing"));
}

#[test]
fn invalid_config_exits_with_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("commitscore.toml"), "[aggregation]\nwindow_days = 0\n")
        .expect("config should write");
    commitscore(dir.path())
        .arg("stats")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config parse error"));
}
