//! Integration tests for the `nso` CLI binary.
//!
//! Argument parsing, completions and error exit codes run without any
//! server. The walkthrough and list tests drive the binary against a
//! wiremock RESTCONF server kept alive on a background runtime.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERFACE: &str =
    "/restconf/data/tailf-ncs:devices/device=ios1/config/tailf-ned-cisco-ios:interface";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `nso` binary with env isolation.
///
/// Clears all `NSO_*` env vars and points the config file at a
/// nonexistent path so tests never touch the user's real configuration.
fn nso_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("nso");
    cmd.env("NSO_CONFIG", "/tmp/nso-cli-test-nonexistent/config.toml")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("NSO_PROFILE")
        .env_remove("NSO_HOST")
        .env_remove("NSO_PORT")
        .env_remove("NSO_USERNAME")
        .env_remove("NSO_PASSWORD")
        .env_remove("NSO_OUTPUT")
        .env_remove("NSO_TIMEOUT");
    cmd
}

/// `nso_cmd` pointed at a mock server with credentials supplied.
fn nso_against(server: &MockServer) -> assert_cmd::Command {
    let addr = server.address();
    let mut cmd = nso_cmd();
    cmd.env("NSO_HOST", addr.ip().to_string())
        .env("NSO_PORT", addr.port().to_string())
        .env("NSO_USERNAME", "admin")
        .env("NSO_PASSWORD", "admin");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Mount the happy-path lab: ios1 already registered next to ios0,
/// every write accepted, no loopbacks present.
async fn mount_lab(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/restconf/data/tailf-ncs:devices/device"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tailf-ncs:device": [{"name": "ios0"}, {"name": "ios1"}]
        })))
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/restconf/data/tailf-ncs:devices/device=ios1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/restconf/data/tailf-ncs:devices"))
        .respond_with(ResponseTemplate::new(201))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/restconf/operations/devices/device=ios1/ssh/fetch-host-keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tailf-ncs:output": {"result": "updated"}
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/restconf/operations/devices/device=ios1/sync-from"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tailf-ncs:output": {"result": true}
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{INTERFACE}/Loopback")))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(INTERFACE))
        .respond_with(ResponseTemplate::new(201))
        .mount(server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{INTERFACE}/Loopback=50/ip/address/primary/address")))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{INTERFACE}/Loopback=50")))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

/// Start the lab on `rt`, with `overrides` taking precedence over it.
fn start_lab(rt: &Runtime, overrides: Vec<Mock>) -> MockServer {
    rt.block_on(async {
        let server = MockServer::start().await;
        for mock in overrides {
            mock.with_priority(1).mount(&server).await;
        }
        mount_lab(&server).await;
        server
    })
}

/// Count received requests with this method and path.
fn count(rt: &Runtime, server: &MockServer, verb: &str, url_path: &str) -> usize {
    rt.block_on(server.received_requests())
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == url_path)
        .count()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = nso_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    nso_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("RESTCONF")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("loopbacks"))
            .and(predicate::str::contains("demo")),
    );
}

#[test]
fn test_version_flag() {
    nso_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nso"));
}

#[test]
fn test_demo_help_shows_lab_defaults() {
    nso_cmd().args(["demo", "--help"]).assert().success().stdout(
        predicate::str::contains("ios1")
            .and(predicate::str::contains("10023"))
            .and(predicate::str::contains("--strict")),
    );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    nso_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    nso_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = nso_cmd().arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_port_is_usage_error() {
    let output = nso_cmd()
        .args(["--port", "not-a-port", "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_password_exits_auth() {
    let output = nso_cmd().args(["devices", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(
        text.contains("No password configured"),
        "Expected credentials error:\n{text}"
    );
}

#[test]
fn test_unknown_profile_exits_not_found() {
    let output = nso_cmd()
        .args(["--profile", "lab", "--password", "x", "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_connection_refused_exits_connection() {
    // Bind then drop to get a port nobody listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let output = nso_cmd()
        .args(["--host", "127.0.0.1", "--port", &port.to_string()])
        .args(["--password", "admin", "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    let text = combined_output(&output);
    assert!(text.contains("Could not connect"), "{text}");
}

// ── Against a mock server ───────────────────────────────────────────

#[test]
fn test_devices_list_plain() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        mount_lab(&server).await;
        server
    });

    nso_against(&server)
        .args(["devices", "list", "--output", "plain"])
        .assert()
        .success()
        .stdout("ios0\nios1\n");
}

#[test]
fn test_devices_list_unauthorized_exits_auth() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restconf/data/tailf-ncs:devices/device"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        server
    });

    let output = nso_against(&server)
        .args(["devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_loopback_delete_missing_exits_not_found() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("{INTERFACE}/Loopback=77")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        server
    });

    let output = nso_against(&server)
        .args(["loopbacks", "delete", "ios1", "77"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("loopbacks list ios1"));
}

#[test]
fn test_demo_walkthrough() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        mount_lab(&server).await;
        server
    });

    let output = nso_against(&server).arg("demo").output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in [
        r#"Initial device list: ["ios0", "ios1"]"#,
        "Device ios1 already exists, deleting device ... response: 204",
        "Creating new device ios1 ... response: 201",
        "Fetching SSH host keys ... response: 200 ... result: updated",
        "Sync from device ... response: 200 ... result: true",
        "Creating new Loopback50 ... response: 201",
        "Updating Loopback50 address to 10.11.50.2 ... response: 204",
        "Deleting Loopback50 ... response: 204",
    ] {
        assert!(stdout.contains(line), "missing {line:?} in:\n{stdout}");
    }

    let requests = rt.block_on(server.received_requests()).unwrap();
    let methods: Vec<&str> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods.iter().filter(|m| **m == "PATCH").count(), 1);
    assert_eq!(methods.iter().filter(|m| **m == "DELETE").count(), 2);
}

#[test]
fn test_demo_strict_stops_on_failed_create() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restconf/data/tailf-ncs:devices/device"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tailf-ncs:device": []
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/restconf/data/tailf-ncs:devices"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad ned-id"))
            .mount(&server)
            .await;
        server
    });

    let output = nso_against(&server)
        .args(["demo", "--strict"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("create device failed (HTTP 400)"), "{text}");

    // Nothing past the failed create was attempted.
    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 2);
}

#[test]
fn test_devices_create_unauthorized_exits_auth() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/restconf/data/tailf-ncs:devices"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        server
    });

    let output = nso_against(&server)
        .args(["devices", "create", "ios1", "--address", "127.0.0.1"])
        .args(["--ned", "cisco-ios-cli-3.8"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Authentication failed"));
}

#[test]
fn test_demo_reports_failed_steps_and_continues() {
    let rt = Runtime::new().unwrap();
    let server = start_lab(
        &rt,
        vec![
            Mock::given(method("POST"))
                .and(path("/restconf/data/tailf-ncs:devices"))
                .respond_with(ResponseTemplate::new(409).set_body_string("already exists")),
            Mock::given(method("POST"))
                .and(path("/restconf/operations/devices/device=ios1/ssh/fetch-host-keys"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "tailf-ncs:output": {"result": "failed", "info": "no route"}
                }))),
        ],
    );

    let output = nso_against(&server).arg("demo").output().unwrap();
    assert_eq!(output.status.code(), Some(0), "{}", combined_output(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Creating new device ios1 ... response: 409"), "{stdout}");
    assert!(stdout.contains("result: failed (no route)"), "{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Completed with 2 failed step(s): create device, fetch SSH host keys"),
        "{stderr}"
    );

    // Everything after the failures still ran.
    let sync = "/restconf/operations/devices/device=ios1/sync-from";
    assert_eq!(count(&rt, &server, "POST", sync), 1);
    assert_eq!(count(&rt, &server, "POST", INTERFACE), 1);
    let address = format!("{INTERFACE}/Loopback=50/ip/address/primary/address");
    assert_eq!(count(&rt, &server, "PATCH", &address), 1);
    let loopback = format!("{INTERFACE}/Loopback=50");
    assert_eq!(count(&rt, &server, "DELETE", &loopback), 1);
}

#[test]
fn test_demo_continues_past_failed_listing() {
    let rt = Runtime::new().unwrap();
    let server = start_lab(
        &rt,
        vec![
            Mock::given(method("GET"))
                .and(path(format!("{INTERFACE}/Loopback")))
                .respond_with(ResponseTemplate::new(500).set_body_string("boom")),
        ],
    );

    let output = nso_against(&server).arg("demo").output().unwrap();
    assert_eq!(output.status.code(), Some(0), "{}", combined_output(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("list loopbacks failed"), "{stdout}");
    assert!(stdout.contains("Deleting Loopback50 ... response: 204"), "{stdout}");
    assert!(String::from_utf8_lossy(&output.stderr).contains("list loopbacks"));

    let address = format!("{INTERFACE}/Loopback=50/ip/address/primary/address");
    assert_eq!(count(&rt, &server, "PATCH", &address), 1);
}

#[test]
fn test_demo_strict_aborts_on_failed_listing() {
    let rt = Runtime::new().unwrap();
    let server = start_lab(
        &rt,
        vec![
            Mock::given(method("GET"))
                .and(path(format!("{INTERFACE}/Loopback")))
                .respond_with(ResponseTemplate::new(500)),
        ],
    );

    let output = nso_against(&server)
        .args(["demo", "--strict"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(count(&rt, &server, "POST", INTERFACE), 0);
}

#[test]
fn test_demo_unreadable_action_result_is_reported() {
    let rt = Runtime::new().unwrap();
    let server = start_lab(
        &rt,
        vec![
            Mock::given(method("POST"))
                .and(path("/restconf/operations/devices/device=ios1/ssh/fetch-host-keys"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>")),
        ],
    );

    let output = nso_against(&server).arg("demo").output().unwrap();
    assert_eq!(output.status.code(), Some(0), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Fetching SSH host keys ... response: 200 ... result: <unreadable>"),
        "{stdout}"
    );
    assert!(stdout.contains("Sync from device ... response: 200 ... result: true"));
}

#[test]
fn test_demo_strict_stops_on_unsuccessful_sync() {
    let rt = Runtime::new().unwrap();
    let server = start_lab(
        &rt,
        vec![
            Mock::given(method("POST"))
                .and(path("/restconf/operations/devices/device=ios1/sync-from"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "tailf-ncs:output": {"result": false, "info": "Device not connected"}
                }))),
        ],
    );

    let output = nso_against(&server)
        .args(["demo", "--strict"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("did not succeed"), "{text}");

    // No loopback work after the failed sync.
    assert_eq!(count(&rt, &server, "POST", INTERFACE), 0);
}
