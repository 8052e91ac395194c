// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Message data model: validated addresses and the immutable outbound message.

pub mod address;
pub mod message;

pub use address::{AddressError, EmailAddress};
pub use message::{MessageError, OutboundMessage};
