// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest provider body excerpt carried in an error detail.
pub(crate) const MAX_DETAIL_CHARS: usize = 512;

/// Failure of a single provider call. Never retried.
#[derive(Debug, Error)]
pub enum MailgunError {
    /// Connection, DNS, TLS or timeout failure, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {detail}")]
    HttpStatus { status: u16, detail: String },

    /// A success response whose body was not the expected JSON.
    #[error("malformed provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl MailgunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::Parse(_) => ErrorKind::Parse,
        }
    }

    /// Human-readable detail without the kind prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Transport(err) => error_chain(err),
            Self::HttpStatus { detail, .. } => detail.clone(),
            Self::Parse(err) => err.to_string(),
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::Parse(_) => None,
        }
    }

    /// Builds an [`MailgunError::HttpStatus`] from a raw provider body, preferring the
    /// provider's JSON `message` field.
    pub(crate) fn from_status_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ProviderMessage {
            message: String,
        }

        let detail = match serde_json::from_str::<ProviderMessage>(body) {
            Ok(parsed) => parsed.message,
            Err(_) if body.trim().is_empty() => "empty response body".to_owned(),
            Err(_) => truncate_chars(body.trim(), MAX_DETAIL_CHARS),
        };
        Self::HttpStatus { status, detail }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    HttpStatus,
    Parse,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::HttpStatus => "http_status",
            Self::Parse => "parse",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &value[..idx]),
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, MailgunError, MAX_DETAIL_CHARS};

    #[test]
    fn status_detail_prefers_provider_message() {
        let err = MailgunError::from_status_body(401, r#"{"message":"Invalid private key"}"#);
        assert_eq!(err.kind(), ErrorKind::HttpStatus);
        assert_eq!(err.detail(), "Invalid private key");
        assert_eq!(err.http_status(), Some(401));
        assert_eq!(err.to_string(), "provider returned HTTP 401: Invalid private key");
    }

    #[test]
    fn status_detail_truncates_raw_bodies() {
        let body = "x".repeat(MAX_DETAIL_CHARS * 2);
        let err = MailgunError::from_status_body(502, &body);
        assert_eq!(err.detail().chars().count(), MAX_DETAIL_CHARS + 1);

        let err = MailgunError::from_status_body(500, "  ");
        assert_eq!(err.detail(), "empty response body");
    }

    #[test]
    fn kinds_serialize_as_snake_case() {
        let kinds = [ErrorKind::Transport, ErrorKind::HttpStatus, ErrorKind::Parse];
        for kind in kinds {
            let json = serde_json::to_value(kind).expect("serialize kind");
            assert_eq!(json, serde_json::Value::String(kind.as_str().to_owned()));
        }
    }

    #[test]
    fn parse_errors_keep_serde_detail() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = MailgunError::from(source);
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.http_status(), None);
        assert!(!err.detail().is_empty());
    }
}
