// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,mailgun_mcp=debug";

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so the stdio MCP transport keeps stdout to itself. `RUST_LOG` overrides
/// the default filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(true).compact();

    // A subscriber may already be installed (tests, embedding); keep the existing one.
    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}
