// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::mailgun::{MailgunClient, MailgunError, MessageSender};
use crate::model::{MessageError, OutboundMessage};

use super::types::*;

#[derive(Clone)]
pub struct MailgunMcp {
    sender: Arc<dyn MessageSender>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MailgunMcp {
    pub fn new(sender: Arc<dyn MessageSender>) -> Self {
        Self { sender, tool_router: Self::tool_router() }
    }

    pub fn with_client(client: MailgunClient) -> Self {
        Self::new(Arc::new(client))
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Send a plain-text email through Mailgun. Exactly one delivery attempt is made; failures
    /// carry `error_kind` (`transport`, `http_status`, `parse`) in the error data.
    #[tool(name = "send_message")]
    async fn send_message(
        &self,
        params: Parameters<SendMessageParams>,
    ) -> Result<Json<SendMessageResponse>, ErrorData> {
        let SendMessageParams { from_email, to, subject, text } = params.0;
        let message =
            OutboundMessage::new(from_email, to, subject, text).map_err(invalid_message)?;

        let receipt = self.sender.send(message).await.map_err(send_failed)?;

        Ok(Json(SendMessageResponse { status: receipt.status, id: receipt.message_id }))
    }
}

#[tool_handler]
impl ServerHandler for MailgunMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Mailgun email server (tools: send_message). Addresses may be `user@domain` or `Name <user@domain>`; the sender should belong to the configured Mailgun domain."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// Error mapping for tool handlers.
include!("server/helpers.rs");
