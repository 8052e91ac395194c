// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::mailgun::ErrorKind;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendMessageParams {
    /// Sender address, `user@domain` or `Name <user@domain>`; normally on the sending domain.
    pub from_email: String,
    /// Recipient address.
    pub to: String,
    /// Subject line (may be empty).
    pub subject: String,
    /// Plain-text body.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SendMessageResponse {
    /// Provider status string, e.g. `Queued. Thank you.`.
    pub status: String,
    /// Provider-assigned message id.
    pub id: String,
}

/// `data` payload attached to a failed `send_message` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SendFailure {
    pub error_kind: ErrorKind,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
}
