// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Server lifecycle.
//!
//! [`McpServerLifecycle`] is the capability the CLI drives: `startup`, `shutdown`, and `get_app`
//! (the axum router serving MCP over streamable HTTP at `/mcp` plus `GET /health`).
//! [`MailgunMcpServer`] is the concrete implementation.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::mailgun::MailgunError;

mod service;

pub use service::MailgunMcpServer;

pub const SERVICE_NAME: &str = "mailgun-mcp";

#[async_trait]
pub trait McpServerLifecycle: Send + Sync + 'static {
    /// Validates external dependencies and marks the server as running.
    async fn startup(&self) -> Result<(), LifecycleError>;

    /// Stops accepting MCP sessions and closes open streams. Safe to call more than once.
    async fn shutdown(&self) -> Result<(), LifecycleError>;

    /// The HTTP application: `/mcp` and `/health`.
    fn get_app(&self) -> Router;

    /// Runs configuration and provider checks without changing lifecycle state.
    async fn health_check(&self) -> HealthReport;

    /// Serves MCP over stdin/stdout until the peer disconnects.
    async fn serve_stdio(&self) -> Result<(), LifecycleError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerPhase {
    Created,
    Running,
    Stopped,
}

impl ServerPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: ServerPhase,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

impl HealthCheck {
    pub fn passed(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, ok: true, detail: detail.into() }
    }

    pub fn failed(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, ok: false, detail: detail.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub checks: Vec<HealthCheck>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|check| check.ok)
    }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("server is already running")]
    AlreadyRunning,
    #[error("server has been shut down")]
    ShutDown,
    #[error("Mailgun rejected the configured credentials ({}): {}", .0.kind(), .0.detail())]
    CredentialCheck(#[source] MailgunError),
    #[error("MCP stdio transport failed: {0}")]
    Stdio(#[from] rmcp::RmcpError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Serves `server.get_app()` on `listener` until `shutdown` resolves, then shuts the server
/// down. The server must already be started.
pub async fn serve_http<S, F>(
    server: Arc<S>,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), LifecycleError>
where
    S: McpServerLifecycle,
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!(
        name: "server.http.listening",
        address = %format!("http://{local_addr}"),
        mcp = %format!("http://{local_addr}/mcp"),
        "serving MCP over streamable HTTP"
    );

    // Open MCP streams only end once the session token is cancelled, so shutdown has to run
    // before axum starts draining connections.
    let signal_server = Arc::clone(&server);
    let serve = axum::serve(listener, server.get_app()).with_graceful_shutdown(async move {
        shutdown.await;
        if let Err(err) = signal_server.shutdown().await {
            warn!(name: "server.shutdown.failed", error = %err, "shutdown failed");
        }
    });
    serve.await?;

    server.shutdown().await
}

/// Resolves on Ctrl-C (and SIGTERM on unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(name: "server.signal.failed", error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(name: "server.signal.failed", error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!(name: "server.signal.received", "shutdown requested");
}
