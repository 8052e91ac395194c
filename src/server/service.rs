// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{
    HealthCheck, HealthReport, HealthStatus, LifecycleError, McpServerLifecycle, ServerPhase,
    SERVICE_NAME,
};
use crate::config::{ConfigError, MailgunConfig};
use crate::mailgun::MailgunClient;
use crate::mcp::MailgunMcp;

/// The Mailgun MCP service: configuration, provider client, and tool handler.
pub struct MailgunMcpServer {
    config: MailgunConfig,
    client: Arc<MailgunClient>,
    mcp: MailgunMcp,
    phase: Arc<Mutex<ServerPhase>>,
    sessions_token: CancellationToken,
}

impl MailgunMcpServer {
    pub fn new(config: MailgunConfig) -> Result<Self, ConfigError> {
        let client = Arc::new(MailgunClient::new(&config)?);
        let mcp = MailgunMcp::new(client.clone());
        Ok(Self {
            config,
            client,
            mcp,
            phase: Arc::new(Mutex::new(ServerPhase::Created)),
            sessions_token: CancellationToken::new(),
        })
    }

    pub fn config(&self) -> &MailgunConfig {
        &self.config
    }

    pub fn mcp(&self) -> &MailgunMcp {
        &self.mcp
    }

    pub async fn phase(&self) -> ServerPhase {
        *self.phase.lock().await
    }
}

#[async_trait]
impl McpServerLifecycle for MailgunMcpServer {
    async fn startup(&self) -> Result<(), LifecycleError> {
        ensure_created(*self.phase.lock().await)?;

        // The provider call runs unlocked so `/health` and `shutdown` stay responsive.
        if self.config.verify_on_startup() {
            self.client.verify_domain().await.map_err(LifecycleError::CredentialCheck)?;
        }

        let mut phase = self.phase.lock().await;
        ensure_created(*phase)?;
        *phase = ServerPhase::Running;
        info!(
            name: "server.started",
            domain = %self.config.domain(),
            api_base_url = %self.config.api_base_url(),
            verified = self.config.verify_on_startup(),
            "server started"
        );
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), LifecycleError> {
        let mut phase = self.phase.lock().await;
        if *phase == ServerPhase::Stopped {
            return Ok(());
        }
        *phase = ServerPhase::Stopped;
        self.sessions_token.cancel();
        info!(name: "server.stopped", "server stopped");
        Ok(())
    }

    fn get_app(&self) -> Router {
        let config = StreamableHttpServerConfig {
            stateful_mode: true,
            cancellation_token: self.sessions_token.child_token(),
            ..StreamableHttpServerConfig::default()
        };
        let session_manager = Arc::new(LocalSessionManager::default());
        let mcp_service = {
            let mcp = self.mcp.clone();
            StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config)
        };

        Router::new()
            .route("/health", get(health))
            .with_state(Arc::clone(&self.phase))
            .nest_service("/mcp", mcp_service)
    }

    async fn health_check(&self) -> HealthReport {
        let mut checks = vec![HealthCheck::passed(
            "configuration",
            format!("domain {} via {}", self.config.domain(), self.config.api_base_url()),
        )];

        checks.push(match self.client.verify_domain().await {
            Ok(()) => HealthCheck::passed("provider", "API key accepted for domain"),
            Err(err) => HealthCheck::failed("provider", format!("{}: {}", err.kind(), err.detail())),
        });

        HealthReport { checks }
    }

    async fn serve_stdio(&self) -> Result<(), LifecycleError> {
        info!(name: "server.stdio.serving", "serving MCP over stdio");
        self.mcp.clone().serve_stdio().await?;
        Ok(())
    }
}

fn ensure_created(phase: ServerPhase) -> Result<(), LifecycleError> {
    match phase {
        ServerPhase::Created => Ok(()),
        ServerPhase::Running => Err(LifecycleError::AlreadyRunning),
        ServerPhase::Stopped => Err(LifecycleError::ShutDown),
    }
}

async fn health(State(phase): State<Arc<Mutex<ServerPhase>>>) -> Json<HealthStatus> {
    let status = *phase.lock().await;
    Json(HealthStatus {
        status,
        service: SERVICE_NAME.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}
