// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// MCP error mapping: input validation becomes `invalid_params`, provider failures become
/// `internal_error` with a [`SendFailure`] payload.
fn invalid_message(err: MessageError) -> ErrorData {
    let data = match &err {
        MessageError::InvalidAddress { field, value, .. } => {
            serde_json::json!({ "field": field, "value": value })
        }
        MessageError::EmptyText => serde_json::json!({ "field": err.field() }),
    };
    ErrorData::invalid_params(err.to_string(), Some(data))
}

fn send_failed(err: MailgunError) -> ErrorData {
    let failure =
        SendFailure { error_kind: err.kind(), detail: err.detail(), http_status: err.http_status() };
    ErrorData::internal_error(format!("send_message failed: {err}"), serde_json::to_value(failure).ok())
}
