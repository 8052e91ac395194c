// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mailgun MCP CLI entrypoint.
//!
//! `mailgun-mcp start` serves MCP over streamable HTTP at `http://<host>:<port>/mcp`;
//! `mailgun-mcp start --stdio` serves it over stdin/stdout for tool integrations.

use std::process::ExitCode;

use clap::Parser;

use mailgun_mcp::cli::Cli;

fn main() -> ExitCode {
    // `.env` must be loaded before clap reads `MAILGUN_*` variables.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    mailgun_mcp::telemetry::init();

    let result = (|| -> anyhow::Result<ExitCode> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(mailgun_mcp::cli::run(cli))
    })();

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("mailgun-mcp: {err:#}");
            ExitCode::FAILURE
        }
    }
}
