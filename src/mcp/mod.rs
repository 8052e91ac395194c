// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! Exposes the `send_message` tool over stdio or, via [`crate::server`], streamable HTTP.

mod server;
mod types;

pub use server::MailgunMcp;
pub use types::{SendFailure, SendMessageParams, SendMessageResponse};
