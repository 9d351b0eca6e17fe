// ABOUTME: Integration tests for the subreap CLI binary.
// ABOUTME: Drives full runs against a mock HTTP server and checks file effects.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn subreap_cmd() -> Command {
    Command::cargo_bin("subreap").unwrap()
}

fn page(body_text: &str) -> String {
    format!("<html><body><div>{}</div></body></html>", body_text)
}

#[test]
fn missing_arguments_is_a_usage_error() {
    subreap_cmd()
        .arg("urls.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn zero_threads_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let urls_file = temp_dir.path().join("urls.txt");
    fs::write(&urls_file, "").unwrap();

    subreap_cmd()
        .arg(&urls_file)
        .arg(temp_dir.path())
        .arg("0")
        .arg(temp_dir.path().join("rest.txt"))
        .assert()
        .failure();
}

#[test]
fn full_run_routes_matches_and_prunes_the_rest() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/b64");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(page("aGVsbG8="));
    });
    server.mock(|when, then| {
        when.method(GET).path("/link");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(page("ss://abc123"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/junk");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(page("unrelated page text"));
    });

    let temp_dir = TempDir::new().unwrap();
    let urls_file = temp_dir.path().join("urls.txt");
    let output_dir = temp_dir.path().join("data");
    let rest_file = temp_dir.path().join("rest.txt");
    fs::create_dir(&output_dir).unwrap();

    let urls = [
        server.url("/b64"),
        server.url("/link"),
        server.url("/junk"),
    ];
    fs::write(&urls_file, urls.join("\n")).unwrap();

    subreap_cmd()
        .arg(&urls_file)
        .arg(&output_dir)
        .arg("3")
        .arg(&rest_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("all URLs processed"))
        .stdout(predicate::str::contains("successfully").count(3));

    let rest = fs::read_to_string(&rest_file).unwrap();
    let lines: Vec<&str> = rest.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.contains(&"hello"));
    assert!(lines.contains(&"ss://abc123"));

    let remaining = fs::read_to_string(&urls_file).unwrap();
    assert!(remaining.contains("/b64"));
    assert!(remaining.contains("/link"));
    assert!(!remaining.contains("/junk"));
}

#[test]
fn per_url_failures_do_not_change_the_exit_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/gone");
        then.status(404).body("not found");
    });

    let temp_dir = TempDir::new().unwrap();
    let urls_file = temp_dir.path().join("urls.txt");
    let output_dir = temp_dir.path().join("data");
    fs::create_dir(&output_dir).unwrap();
    fs::write(&urls_file, server.url("/gone")).unwrap();

    subreap_cmd()
        .arg(&urls_file)
        .arg(&output_dir)
        .arg("2")
        .arg(temp_dir.path().join("rest.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("failed"))
        .stdout(predicate::str::contains("all URLs processed"));
}

#[test]
fn empty_url_list_completes_immediately() {
    let temp_dir = TempDir::new().unwrap();
    let urls_file = temp_dir.path().join("urls.txt");
    let output_dir = temp_dir.path().join("data");
    fs::create_dir(&output_dir).unwrap();
    fs::write(&urls_file, "").unwrap();

    let output = subreap_cmd()
        .arg(&urls_file)
        .arg(&output_dir)
        .arg("4")
        .arg(temp_dir.path().join("rest.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("all URLs processed"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(
        !stdout.contains("processing"),
        "expected no per-URL lines, got: {}",
        stdout
    );
}
