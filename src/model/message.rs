// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

use super::address::{AddressError, EmailAddress};

/// A single plain-text message, validated and frozen at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    from_email: EmailAddress,
    to: EmailAddress,
    subject: String,
    text: String,
}

impl OutboundMessage {
    pub fn new(
        from_email: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, MessageError> {
        let from_email = parse_address("from_email", from_email.into())?;
        let to = parse_address("to", to.into())?;

        let text = text.into();
        if text.trim().is_empty() {
            return Err(MessageError::EmptyText);
        }

        Ok(Self { from_email, to, subject: subject.into(), text })
    }

    pub fn from_email(&self) -> &EmailAddress {
        &self.from_email
    }

    pub fn to(&self) -> &EmailAddress {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Provider form fields, in wire order. Nothing else is ever sent.
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("from", self.from_email.as_str()),
            ("to", self.to.as_str()),
            ("subject", &self.subject),
            ("text", &self.text),
        ]
    }
}

fn parse_address(field: &'static str, value: String) -> Result<EmailAddress, MessageError> {
    EmailAddress::new(value.clone())
        .map_err(|source| MessageError::InvalidAddress { field, value, source })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("invalid {field} '{value}': {source}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        #[source]
        source: AddressError,
    },
    #[error("text must not be empty")]
    EmptyText,
}

impl MessageError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidAddress { field, .. } => field,
            Self::EmptyText => "text",
        }
    }
}
