use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_repos(dir: &Path, contents: &str) {
    fs::write(dir.join("repos.txt"), contents).unwrap();
}

fn ghcontrib(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ghcontrib").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("GITHUB_API_URL")
        .env("GITHUB_TOKEN", "test-token")
        .arg("--no-progress");
    cmd
}

#[test]
fn malformed_identifiers_produce_header_only_csv() {
    let dir = tempdir().unwrap();
    write_repos(dir.path(), "noslash\n\ntoo/many/slashes\n/missing-owner\n");

    let out = ghcontrib(dir.path())
        .args(["--start", "2024-01-01", "--end", "2024-01-31"])
        .assert()
        .success()
        .get_output()
        .clone();

    let csv = fs::read_to_string(dir.path().join("output.csv")).unwrap();
    assert_eq!(
        csv,
        "Repository,Contributor,Additions,Deletions,Commits,StartDate,EndDate\n"
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("skipping repository"));
    assert!(stderr.contains("Records written"));
}

#[test]
fn ndjson_goes_to_stdout() {
    let dir = tempdir().unwrap();
    write_repos(dir.path(), "noslash\n");

    let out = ghcontrib(dir.path())
        .args(["--format", "ndjson"])
        .assert()
        .success()
        .get_output()
        .clone();

    assert!(out.stdout.is_empty());
    assert!(!dir.path().join("output.csv").exists());
}

#[test]
fn custom_output_path_is_honored() {
    let dir = tempdir().unwrap();
    write_repos(dir.path(), "");

    ghcontrib(dir.path())
        .args(["--output", "stats.csv"])
        .assert()
        .success();

    assert!(dir.path().join("stats.csv").exists());
}

#[test]
fn missing_token_fails() {
    let dir = tempdir().unwrap();
    write_repos(dir.path(), "owner/repo\n");

    let out = ghcontrib(dir.path())
        .env_remove("GITHUB_TOKEN")
        .args(["--token-env", "GHCONTRIB_SMOKE_TOKEN_UNSET"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("No GitHub token available"));
}

#[test]
fn missing_repository_list_fails() {
    let dir = tempdir().unwrap();

    let out = ghcontrib(dir.path())
        .args(["--repos-file", "nope.txt"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Failed to read repository list"));
}

#[test]
fn invalid_date_fails() {
    let dir = tempdir().unwrap();
    write_repos(dir.path(), "owner/repo\n");

    ghcontrib(dir.path())
        .args(["--start", "last tuesday"])
        .assert()
        .failure();
}
