// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use super::error::MailgunError;
use super::sender::{MessageSender, SendReceipt, SendResult};
use crate::config::{ConfigError, Credentials, MailgunConfig};
use crate::model::OutboundMessage;

const USER_AGENT: &str = concat!("mailgun-mcp/", env!("CARGO_PKG_VERSION"));
const BASIC_AUTH_USER: &str = "api";
const DEFAULT_ACCEPTED_STATUS: &str = "queued";

/// Mailgun HTTP API client.
///
/// Every call acquires its own HTTP client and releases it when the call returns, on success
/// and on every error path; nothing is pooled between calls.
#[derive(Debug, Clone)]
pub struct MailgunClient {
    credentials: Credentials,
    messages_url: Url,
    domain_url: Url,
}

/// Body of a 2xx reply to `POST /v3/{domain}/messages`.
#[derive(Debug, Deserialize)]
struct AcceptedResponse {
    id: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl MailgunClient {
    pub fn new(config: &MailgunConfig) -> Result<Self, ConfigError> {
        let base = config.api_base_url();
        let domain = config.domain();
        Ok(Self {
            credentials: config.credentials().clone(),
            messages_url: endpoint(base, &["v3", domain, "messages"])?,
            domain_url: endpoint(base, &["v3", "domains", domain])?,
        })
    }

    pub fn domain(&self) -> &str {
        &self.credentials.domain
    }

    pub fn messages_url(&self) -> &Url {
        &self.messages_url
    }

    pub fn domain_url(&self) -> &Url {
        &self.domain_url
    }

    /// Checks that the API key can read the configured sending domain.
    pub async fn verify_domain(&self) -> Result<(), MailgunError> {
        let http = scoped_http_client()?;
        let response = http
            .get(self.domain_url.clone())
            .basic_auth(BASIC_AUTH_USER, Some(self.credentials.api_key.expose()))
            .send()
            .await
            .map_err(MailgunError::Transport)?;

        let status = response.status();
        if status.is_success() {
            debug!(name: "mailgun.domain.verified", domain = %self.credentials.domain, "domain verified");
            return Ok(());
        }

        let body = response.text().await.map_err(MailgunError::Transport)?;
        Err(MailgunError::from_status_body(status.as_u16(), &body))
    }

    async fn post_message(&self, message: &OutboundMessage) -> SendResult {
        let http = scoped_http_client()?;
        let response = http
            .post(self.messages_url.clone())
            .basic_auth(BASIC_AUTH_USER, Some(self.credentials.api_key.expose()))
            .form(&message.form_fields())
            .send()
            .await
            .map_err(MailgunError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(MailgunError::Transport)?;
        if !status.is_success() {
            return Err(MailgunError::from_status_body(status.as_u16(), &body));
        }

        let accepted: AcceptedResponse = serde_json::from_str(&body)?;
        Ok(SendReceipt {
            status: accepted
                .status
                .or(accepted.message)
                .unwrap_or_else(|| DEFAULT_ACCEPTED_STATUS.to_owned()),
            message_id: accepted.id,
        })
    }
}

#[async_trait]
impl MessageSender for MailgunClient {
    async fn send(&self, message: OutboundMessage) -> SendResult {
        debug!(
            name: "mailgun.send.start",
            domain = %self.credentials.domain,
            to_domain = %message.to().domain(),
            "sending message"
        );

        let result = self.post_message(&message).await;
        match &result {
            Ok(receipt) => info!(
                name: "mailgun.send.accepted",
                message_id = %receipt.message_id,
                status = %receipt.status,
                "message accepted"
            ),
            Err(err) => warn!(
                name: "mailgun.send.failed",
                kind = %err.kind(),
                detail = %err.detail(),
                "message rejected"
            ),
        }
        result
    }
}

/// A builder failure (TLS backend or resolver setup) is reported as `transport`: the call
/// could not reach the provider, and the error taxonomy has no local-setup kind.
fn scoped_http_client() -> Result<reqwest::Client, MailgunError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(0)
        .build()
        .map_err(MailgunError::Transport)
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ConfigError::InvalidApiBaseUrl {
            value: base.to_string(),
            reason: "URL cannot carry a path".to_owned(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
