//! Integration tests for the `koala-shield` CLI binary.
//!
//! Argument parsing, help output, completions, and input validation run
//! without AWS or the routing service. Lookups run against a wiremock
//! stand-in for the routing API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `koala-shield` binary with env isolation.
///
/// Clears `SHIELD_*` and AWS env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn koala_shield_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("koala-shield");
    cmd.env("HOME", "/tmp/koala-shield-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/koala-shield-test-nonexistent")
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env("AWS_ACCESS_KEY_ID", "AKIDTEST")
        .env("AWS_SECRET_ACCESS_KEY", "test-secret")
        .env_remove("AWS_REGION")
        .env_remove("AWS_PROFILE")
        .env_remove("AWS_ENDPOINT_URL")
        .env_remove("SHIELD_AWS_REGION")
        .env_remove("SHIELD_OUTPUT")
        .env_remove("SHIELD_COLOR")
        .env_remove("SHIELD_TIMEOUT")
        .env_remove("SHIELD_ROUTING__BASE_URL")
        .env_remove("SHIELD_ROUTING__TIMEOUT")
        .env_remove("SHIELD_ROUTING__BACKOFF")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn ok(data: serde_json::Value) -> serde_json::Value {
    json!({
        "status": "ok",
        "status_message": "Query was successful",
        "data": data
    })
}

/// Mount a routing API that knows 8.6.8.0 and AS20473.
async fn routing_server() -> MockServer {
    let server = MockServer::start().await;
    let asn = json!({
        "asn": 20473,
        "name": "AS-CHOOPA",
        "description": "Choopa, LLC",
        "country_code": "US"
    });

    Mock::given(method("GET"))
        .and(path("/ip/8.6.8.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "ip": "8.6.8.0",
            "prefixes": [
                {
                    "prefix": "8.0.0.0/9",
                    "ip": "8.0.0.0",
                    "cidr": 9,
                    "asn": {
                        "asn": 3356,
                        "name": "LEVEL3",
                        "description": "Level 3 Parent, LLC",
                        "country_code": "US"
                    },
                    "name": null,
                    "description": null,
                    "country_code": "US"
                },
                {
                    "prefix": "8.6.8.0/24",
                    "ip": "8.6.8.0",
                    "cidr": 24,
                    "asn": asn,
                    "name": "LVLT-CHOOP-1-8-6-8",
                    "description": "Choopa, LLC",
                    "country_code": "US"
                }
            ]
        }))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/asn/20473"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "asn": 20473,
            "name": "AS-CHOOPA",
            "description_short": "Choopa, LLC",
            "country_code": "US",
            "website": "https://www.choopa.com/"
        }))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/asn/20473/prefixes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "ipv4_prefixes": [
                { "prefix": "8.6.8.0/24", "ip": "8.6.8.0", "cidr": 24, "country_code": "US" },
                { "prefix": "45.32.0.0/16", "ip": "45.32.0.0", "cidr": 16, "country_code": "US" },
                { "prefix": "108.61.0.0/16", "ip": "108.61.0.0", "cidr": 16, "country_code": "US" }
            ],
            "ipv6_prefixes": [
                { "prefix": "2001:19f0::/32", "ip": "2001:19f0::", "cidr": 32, "country_code": "US" }
            ]
        }))))
        .mount(&server)
        .await;

    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = koala_shield_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    koala_shield_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("ASN")
            .and(predicate::str::contains("block"))
            .and(predicate::str::contains("un-block"))
            .and(predicate::str::contains("ipsets"))
            .and(predicate::str::contains("lookup")),
    );
}

#[test]
fn test_version_flag() {
    koala_shield_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("koala-shield"));
}

#[test]
fn test_block_requires_an_asn() {
    let output = koala_shield_cmd().arg("block").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unblock_alias_is_accepted() {
    koala_shield_cmd()
        .args(["unblock", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ASN"));
}

#[test]
fn test_invalid_output_format_is_rejected() {
    let output = koala_shield_cmd()
        .args(["--output", "xml", "ipsets"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("xml"), "Expected the bad value echoed:\n{text}");
}

// ── Completions ─────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    koala_shield_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("koala-shield"));
}

#[test]
fn test_completions_zsh() {
    koala_shield_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef koala-shield"));
}

// ── Validation before any network call ──────────────────────────────

#[test]
fn test_block_rejects_ip_address() {
    let output = koala_shield_cmd()
        .args(["--color", "never", "block", "192.168.1.1", "--yes"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("is an IP address"),
        "Expected the IP rejection on stdout:\n{stdout}"
    );
}

#[test]
fn test_unblock_rejects_garbage() {
    let output = koala_shield_cmd()
        .args(["--color", "never", "un-block", "not-an-asn"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("invalid ASN"), "Expected ASN parse error:\n{text}");
}

#[test]
fn test_zero_timeout_is_rejected() {
    let output = koala_shield_cmd()
        .args(["--timeout", "0", "ipsets"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("timeout"), "Expected timeout validation:\n{text}");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    koala_shield_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_reflects_environment() {
    koala_shield_cmd()
        .env("SHIELD_AWS_REGION", "eu-west-1")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("aws_region = \"eu-west-1\"")
                .and(predicate::str::contains("[routing]")),
        );
}

#[test]
fn test_config_show_json() {
    let output = koala_shield_cmd()
        .args(["--output", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["aws_region"], "us-east-1");
    assert_eq!(parsed["routing"]["backoff"], json!([1, 3, 5, 10]));
}

// ── Lookup against a mock routing API ───────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_ip_json() {
    let server = routing_server().await;

    let output = koala_shield_cmd()
        .env("SHIELD_ROUTING__BASE_URL", server.uri())
        .args(["--output", "json", "lookup", "8.6.8.0"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let row = &parsed[0];
    assert_eq!(row["kind"], "IP");
    assert_eq!(row["record"], "8.6.8.0");
    assert_eq!(row["asn_number"], 20473);
    assert_eq!(row["asn_name"], "AS-CHOOPA");
    assert_eq!(row["asn_ipv4_count"], 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_mixed_records_table() {
    let server = routing_server().await;

    koala_shield_cmd()
        .env("SHIELD_ROUTING__BASE_URL", server.uri())
        .args(["--color", "never", "lookup", "8.6.8.0", "AS20473"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ASN IPv4 Prefixes")
                .and(predicate::str::contains("AS-CHOOPA"))
                .and(predicate::str::contains("AS20473"))
                .and(predicate::str::contains("\u{1F1FA}\u{1F1F8}")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_plain_prints_asn_numbers() {
    let server = routing_server().await;

    koala_shield_cmd()
        .env("SHIELD_ROUTING__BASE_URL", server.uri())
        .args(["--output", "plain", "lookup", "20473"])
        .assert()
        .success()
        .stdout("20473\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_routing_api_error_exits_1() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/asn/99999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "status_message": "Malformed input"
        })))
        .mount(&server)
        .await;

    let output = koala_shield_cmd()
        .env("SHIELD_ROUTING__BASE_URL", server.uri())
        .args(["--color", "never", "lookup", "99999"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("Malformed input"), "Expected API message:\n{text}");
}
