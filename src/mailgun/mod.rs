// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mailgun HTTP API access.
//!
//! [`MailgunClient`] is the production [`MessageSender`]: one form-encoded `POST` per message to
//! `/v3/{domain}/messages`, authenticated with HTTP basic auth (`api:<key>`).

pub mod client;
pub mod error;
pub mod sender;

pub use crate::config::Credentials;
pub use client::MailgunClient;
pub use error::{ErrorKind, MailgunError};
pub use sender::{MessageSender, SendReceipt, SendResult};

#[cfg(test)]
pub use sender::MockMessageSender;
