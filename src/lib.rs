// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mailgun MCP: send email through the Mailgun HTTP API from MCP clients.
//!
//! The [`mailgun`] module holds the sender, [`mcp`] the tool surface, [`server`] the lifecycle
//! and HTTP app, and [`cli`] the command-line front end.

pub mod cli;
pub mod config;
pub mod mailgun;
pub mod mcp;
pub mod model;
pub mod server;
pub mod telemetry;
