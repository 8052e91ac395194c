// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use clap::Parser;
use rstest::rstest;
use tokio::net::TcpListener;

use super::*;
use crate::config::MailgunConfig;
use crate::server::McpServerLifecycle;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("mailgun-mcp").chain(args.iter().copied()))
        .expect("parse cli")
}

fn test_config() -> MailgunConfig {
    MailgunConfig::new("key-0123456789abcdef", "mg.example.com")
        .and_then(|config| config.with_api_base_url("http://127.0.0.1:1"))
        .expect("config")
        .with_verify_on_startup(false)
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("utf-8 output")
}

/// Reserves an ephemeral port and releases it, so nothing is listening there.
async fn closed_port() -> u16 {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind");
    listener.local_addr().expect("local addr").port()
}

#[rstest]
#[case(&["config"], Command::Config { json: false })]
#[case(&["config", "--json"], Command::Config { json: true })]
#[case(&["health"], Command::Health)]
#[case(&["status"], Command::Status)]
#[case(&["start"], Command::Start { stdio: false })]
#[case(&["start", "--stdio"], Command::Start { stdio: true })]
fn parses_subcommands(#[case] args: &[&str], #[case] expected: Command) {
    assert_eq!(parse(args).command, expected);
}

#[test]
fn config_flags_are_accepted_after_the_subcommand() {
    let cli = parse(&["start", "--http-port", "9001", "--domain", "mg.example.com"]);
    assert_eq!(cli.config.http_port, 9001);
    assert_eq!(cli.config.domain.as_deref(), Some("mg.example.com"));
}

#[test]
fn rejects_missing_subcommand() {
    Cli::try_parse_from(["mailgun-mcp"]).unwrap_err();
    Cli::try_parse_from(["mailgun-mcp", "serve"]).unwrap_err();
}

#[test]
fn show_config_redacts_api_key_in_text_and_json() {
    let config = test_config();

    let mut text = Vec::new();
    assert_eq!(show_config(&config, false, &mut text).expect("config"), Outcome::Success);
    let text = output(text);
    assert!(text.contains("****cdef"), "{text}");
    assert!(text.contains("mg.example.com"), "{text}");
    assert!(!text.contains("0123456789"), "{text}");

    let mut json = Vec::new();
    show_config(&config, true, &mut json).expect("config json");
    let json: serde_json::Value = serde_json::from_slice(&json).expect("json output");
    assert_eq!(json["api_key"], "****cdef");
    assert_eq!(json["domain"], "mg.example.com");
    assert_eq!(json["verify_on_startup"], false);
}

#[rstest]
#[case("127.0.0.1", 3039, "http://127.0.0.1:3039")]
#[case("0.0.0.0", 80, "http://127.0.0.1:80")]
#[case("", 80, "http://127.0.0.1:80")]
#[case("::", 8080, "http://[::1]:8080")]
#[case("::1", 8080, "http://[::1]:8080")]
#[case("localhost", 1, "http://localhost:1")]
fn probe_url_reaches_wildcard_binds_through_loopback(
    #[case] host: &str,
    #[case] port: u16,
    #[case] expected: &str,
) {
    assert_eq!(probe_url(host, port), expected);
}

#[tokio::test]
async fn status_reports_not_running_for_closed_port() {
    let port = closed_port().await;

    let mut out = Vec::new();
    let outcome = check_status("127.0.0.1", port, &mut out).await.expect("status");

    assert_eq!(outcome, Outcome::Failure);
    assert!(output(out).contains("is not running"));
}

#[tokio::test]
async fn status_reports_running_server() {
    let server = Arc::new(MailgunMcpServer::new(test_config()).expect("server"));
    server.startup().await.expect("startup");

    let listener = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let app = server.get_app();
    let handle = tokio::spawn(async move { axum::serve(listener, app).await });

    let mut out = Vec::new();
    let outcome = check_status("127.0.0.1", port, &mut out).await.expect("status");
    assert_eq!(outcome, Outcome::Success, "{}", output(out.clone()));
    assert!(output(out).contains("is running"));

    server.shutdown().await.expect("shutdown");
    let mut out = Vec::new();
    let outcome = check_status("127.0.0.1", port, &mut out).await.expect("status");
    assert_eq!(outcome, Outcome::Failure);
    assert!(output(out).contains("is stopped"));

    handle.abort();
}

#[tokio::test]
async fn health_fails_when_provider_is_unreachable() {
    let server = MailgunMcpServer::new(test_config()).expect("server");

    let mut out = Vec::new();
    let outcome = check_health(&server, &mut out).await.expect("health");

    assert_eq!(outcome, Outcome::Failure);
    let text = output(out);
    assert!(text.contains("ok   configuration"), "{text}");
    assert!(text.contains("FAIL provider"), "{text}");
    assert!(text.ends_with("mailgun-mcp is unhealthy\n"), "{text}");
}

#[tokio::test]
async fn start_fails_fast_when_port_is_taken() {
    let taken = TcpListener::bind(("127.0.0.1", 0)).await.expect("bind");
    let port = taken.local_addr().expect("local addr").port();
    let server = Arc::new(MailgunMcpServer::new(test_config()).expect("server"));

    let err = start(Arc::clone(&server), "127.0.0.1", port, false).await.unwrap_err();

    assert!(err.to_string().contains("failed to bind"), "{err:#}");
    assert_eq!(server.phase().await, crate::server::ServerPhase::Stopped);
}
