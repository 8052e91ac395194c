// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::debug;

use crate::config::MailgunConfig;
use crate::server::{
    serve_http, shutdown_signal, HealthStatus, McpServerLifecycle, ServerPhase, SERVICE_NAME,
};

const STATUS_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Result of a command, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Failure => Self::FAILURE,
        }
    }
}

pub fn show_config(
    config: &MailgunConfig,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let view = config.view();
    if json {
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;
        return Ok(Outcome::Success);
    }

    let rows = [
        ("api_key", view.api_key),
        ("domain", view.domain),
        ("api_base_url", view.api_base_url),
        ("http_host", view.http_host),
        ("http_port", view.http_port.to_string()),
        ("verify_on_startup", view.verify_on_startup.to_string()),
    ];
    for (key, value) in rows {
        writeln!(out, "{key:<18} {value}")?;
    }
    Ok(Outcome::Success)
}

pub async fn check_health<S: McpServerLifecycle>(
    server: &S,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let report = server.health_check().await;
    for check in &report.checks {
        let mark = if check.ok { "ok" } else { "FAIL" };
        writeln!(out, "{mark:<4} {:<14} {}", check.name, check.detail)?;
    }

    if report.is_healthy() {
        writeln!(out, "{SERVICE_NAME} is healthy")?;
        Ok(Outcome::Success)
    } else {
        writeln!(out, "{SERVICE_NAME} is unhealthy")?;
        Ok(Outcome::Failure)
    }
}

pub async fn check_status(host: &str, port: u16, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let base = probe_url(host, port);
    let http = reqwest::Client::builder().timeout(STATUS_PROBE_TIMEOUT).build()?;

    let probe = async {
        let response = http.get(format!("{base}/health")).send().await?.error_for_status()?;
        response.json::<HealthStatus>().await
    };

    match probe.await {
        Ok(health) if health.status == ServerPhase::Running => {
            writeln!(out, "{SERVICE_NAME} is running at {base} (version {})", health.version)?;
            Ok(Outcome::Success)
        }
        Ok(health) => {
            writeln!(out, "{SERVICE_NAME} at {base} is {}", health.status.as_str())?;
            Ok(Outcome::Failure)
        }
        Err(err) => {
            debug!(name: "cli.status.probe_failed", error = %err, "status probe failed");
            writeln!(out, "{SERVICE_NAME} is not running at {base}")?;
            Ok(Outcome::Failure)
        }
    }
}

/// Base URL a local client should use to reach a server bound to `host:port`.
///
/// Wildcard binds are probed through loopback.
pub fn probe_url(host: &str, port: u16) -> String {
    let host = host.trim();
    let host = match host {
        "" | "0.0.0.0" => "127.0.0.1".to_owned(),
        "::" | "[::]" => "[::1]".to_owned(),
        _ if host.contains(':') && !host.starts_with('[') => format!("[{host}]"),
        _ => host.to_owned(),
    };
    format!("http://{host}:{port}")
}

/// Starts `server` and serves it until the transport ends or a shutdown signal arrives.
pub async fn start<S: McpServerLifecycle>(
    server: Arc<S>,
    host: &str,
    port: u16,
    stdio: bool,
) -> anyhow::Result<Outcome> {
    server.startup().await?;

    if stdio {
        let served = server.serve_stdio().await;
        server.shutdown().await?;
        served?;
        return Ok(Outcome::Success);
    }

    let listener = match TcpListener::bind((host, port)).await {
        Ok(listener) => listener,
        Err(err) => {
            server.shutdown().await?;
            return Err(err).with_context(|| format!("failed to bind {host}:{port}"));
        }
    };
    serve_http(server, listener, shutdown_signal()).await?;
    Ok(Outcome::Success)
}
