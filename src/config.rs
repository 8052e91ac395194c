// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration.
//!
//! Values come from CLI flags, then `MAILGUN_*` environment variables (a `.env` file is loaded
//! into the environment by the binary), then built-in defaults. The result is an immutable
//! [`MailgunConfig`] that is handed to the client and server at construction time.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::model::address::is_valid_domain;

pub const DEFAULT_API_BASE_URL: &str = "https://api.mailgun.net";
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 3039;

/// Configuration flags shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct ConfigArgs {
    /// Mailgun private API key.
    #[arg(long, env = "MAILGUN_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Sending domain registered with Mailgun (e.g. `mg.example.com`).
    #[arg(long, env = "MAILGUN_DOMAIN", global = true)]
    pub domain: Option<String>,

    /// Mailgun API base URL; use `https://api.eu.mailgun.net` for EU domains.
    #[arg(long, env = "MAILGUN_API_BASE_URL", default_value = DEFAULT_API_BASE_URL, global = true)]
    pub api_base_url: String,

    /// Host the HTTP transport binds to.
    #[arg(long, env = "MAILGUN_HTTP_HOST", default_value = DEFAULT_HTTP_HOST, global = true)]
    pub http_host: String,

    /// Port the HTTP transport binds to (0 = ephemeral).
    #[arg(long, env = "MAILGUN_HTTP_PORT", default_value_t = DEFAULT_HTTP_PORT, global = true)]
    pub http_port: u16,

    /// Skip validating the API key against the provider during startup.
    #[arg(long, env = "MAILGUN_SKIP_CREDENTIAL_CHECK", global = true)]
    pub skip_credential_check: bool,
}

impl ConfigArgs {
    pub fn into_config(self) -> Result<MailgunConfig, ConfigError> {
        MailgunConfig::try_from(self)
    }
}

impl TryFrom<ConfigArgs> for MailgunConfig {
    type Error = ConfigError;

    fn try_from(args: ConfigArgs) -> Result<Self, Self::Error> {
        let api_key = args.api_key.filter(|key| !key.trim().is_empty());
        let api_key = api_key.ok_or(ConfigError::MissingApiKey)?;
        let domain = args.domain.filter(|domain| !domain.trim().is_empty());
        let domain = domain.ok_or(ConfigError::MissingDomain)?;

        Ok(Self::new(api_key, domain)?
            .with_api_base_url(&args.api_base_url)?
            .with_http_host(args.http_host)
            .with_http_port(args.http_port)
            .with_verify_on_startup(!args.skip_credential_check))
    }
}

/// The provider secret. `Debug` and `Display` never print it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `****` followed by the last four characters, or only `****` for short keys.
    pub fn redacted(&self) -> String {
        let count = self.0.chars().count();
        if count <= 8 {
            return "****".to_owned();
        }
        let tail: String = self.0.chars().skip(count - 4).collect();
        format!("****{tail}")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.redacted()).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// What the sender needs to authenticate against the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: ApiKey,
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailgunConfig {
    credentials: Credentials,
    api_base_url: Url,
    http_host: String,
    http_port: u16,
    verify_on_startup: bool,
}

impl MailgunConfig {
    pub fn new(api_key: impl Into<String>, domain: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let domain = domain.into().trim().to_ascii_lowercase();
        if domain.is_empty() {
            return Err(ConfigError::MissingDomain);
        }
        if !is_valid_domain(&domain) {
            return Err(ConfigError::InvalidDomain(domain));
        }

        Ok(Self {
            credentials: Credentials { api_key: ApiKey::new(api_key.trim()), domain },
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .map_err(|err| invalid_base_url(DEFAULT_API_BASE_URL, err))?,
            http_host: DEFAULT_HTTP_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            verify_on_startup: true,
        })
    }

    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw.trim()).map_err(|err| invalid_base_url(raw, err))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiBaseUrl {
                value: raw.to_owned(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ConfigError::InvalidApiBaseUrl {
                value: raw.to_owned(),
                reason: "missing host".to_owned(),
            });
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::InvalidApiBaseUrl {
                value: raw.to_owned(),
                reason: "query strings and fragments are not allowed".to_owned(),
            });
        }
        self.api_base_url = url;
        Ok(self)
    }

    pub fn with_http_host(mut self, host: impl Into<String>) -> Self {
        self.http_host = host.into();
        self
    }

    pub fn with_http_port(mut self, port: u16) -> Self {
        self.http_port = port;
        self
    }

    pub fn with_verify_on_startup(mut self, verify: bool) -> Self {
        self.verify_on_startup = verify;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn domain(&self) -> &str {
        &self.credentials.domain
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn http_host(&self) -> &str {
        &self.http_host
    }

    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    pub fn verify_on_startup(&self) -> bool {
        self.verify_on_startup
    }

    /// A printable snapshot with the API key redacted.
    pub fn view(&self) -> ConfigView {
        ConfigView {
            api_key: self.credentials.api_key.redacted(),
            domain: self.credentials.domain.clone(),
            api_base_url: self.api_base_url.to_string(),
            http_host: self.http_host.clone(),
            http_port: self.http_port,
            verify_on_startup: self.verify_on_startup,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigView {
    pub api_key: String,
    pub domain: String,
    pub api_base_url: String,
    pub http_host: String,
    pub http_port: u16,
    pub verify_on_startup: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("MAILGUN_API_KEY is not set (pass --api-key or set the environment variable)")]
    MissingApiKey,
    #[error("MAILGUN_DOMAIN is not set (pass --domain or set the environment variable)")]
    MissingDomain,
    #[error("'{0}' is not a valid sending domain")]
    InvalidDomain(String),
    #[error("invalid Mailgun API base URL '{value}': {reason}")]
    InvalidApiBaseUrl { value: String, reason: String },
}

fn invalid_base_url(value: &str, err: url::ParseError) -> ConfigError {
    ConfigError::InvalidApiBaseUrl { value: value.to_owned(), reason: err.to_string() }
}
