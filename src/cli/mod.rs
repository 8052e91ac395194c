// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command-line interface: `config`, `health`, `status`, `start`.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::ConfigArgs;
use crate::server::MailgunMcpServer;

mod commands;

pub use commands::{check_health, check_status, probe_url, show_config, start, Outcome};

#[derive(Debug, Parser)]
#[command(
    name = "mailgun-mcp",
    version,
    about = "Mailgun MCP Server - Email management via Mailgun API"
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the effective configuration with the API key redacted.
    Config {
        /// Print JSON instead of aligned text.
        #[arg(long)]
        json: bool,
    },
    /// Check the configuration and that Mailgun accepts the credentials.
    Health,
    /// Report whether a server is answering on the configured HTTP address.
    Status,
    /// Start the MCP server (streamable HTTP at `/mcp` by default).
    Start {
        /// Serve MCP over stdin/stdout instead of HTTP.
        #[arg(long)]
        stdio: bool,
    },
}

/// Dispatches a parsed command line, writing human output to stdout.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Not locked: the stdio transport writes to the same stream.
    let mut out = std::io::stdout();

    let outcome = match cli.command {
        Command::Status => {
            check_status(&cli.config.http_host, cli.config.http_port, &mut out).await?
        }
        Command::Config { json } => {
            let config = cli.config.into_config()?;
            show_config(&config, json, &mut out)?
        }
        Command::Health => {
            let server = MailgunMcpServer::new(cli.config.into_config()?)?;
            check_health(&server, &mut out).await?
        }
        Command::Start { stdio } => {
            let config = cli.config.into_config()?;
            let host = config.http_host().to_owned();
            let port = config.http_port();
            let server = Arc::new(MailgunMcpServer::new(config)?);
            start(server, &host, port, stdio).await?
        }
    };

    Ok(outcome.into())
}

#[cfg(test)]
mod tests;
