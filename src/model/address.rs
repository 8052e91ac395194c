// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-MailgunMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mailgun MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A mailbox accepted by the provider's `from`/`to` fields.
///
/// Either a bare addr-spec (`local@domain`) or the display form
/// `Name <local@domain>`. Only syntax is checked; CR/LF and other control characters
/// are rejected. Deliverability is left to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    value: String,
    addr_spec: (usize, usize),
}

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> Result<Self, AddressError> {
        let value = value.into().trim().to_owned();
        let addr_spec = locate_addr_spec(&value)?;
        validate_addr_spec(&value[addr_spec.0..addr_spec.1])?;
        Ok(Self { value, addr_spec })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The `local@domain` part, without any display name.
    pub fn addr_spec(&self) -> &str {
        &self.value[self.addr_spec.0..self.addr_spec.1]
    }

    pub fn domain(&self) -> &str {
        let spec = self.addr_spec();
        spec.rsplit_once('@').map(|(_, domain)| domain).unwrap_or_default()
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for EmailAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must not be empty")]
    Empty,
    #[error("address must not contain control characters")]
    ControlCharacter,
    #[error("address has unbalanced angle brackets")]
    UnbalancedBrackets,
    #[error("address must contain exactly one '@'")]
    AtSign,
    #[error("address local part must not be empty")]
    EmptyLocalPart,
    #[error("address must not contain whitespace outside the display name")]
    Whitespace,
    #[error("display name must be quoted when it contains , ; @ < > or \"")]
    UnquotedDisplayName,
    #[error("address local part must not contain , ; : \" ( ) [ ] or \\")]
    LocalPartSpecials,
    #[error("address domain '{0}' is not a valid host name")]
    InvalidDomain(String),
}

const DISPLAY_NAME_SPECIALS: [char; 6] = [',', ';', '@', '<', '>', '"'];
const LOCAL_PART_SPECIALS: [char; 9] = [',', ';', ':', '"', '(', ')', '[', ']', '\\'];

/// Returns the byte range of the addr-spec inside `value`.
fn locate_addr_spec(value: &str) -> Result<(usize, usize), AddressError> {
    if value.is_empty() {
        return Err(AddressError::Empty);
    }
    if value.chars().any(char::is_control) {
        return Err(AddressError::ControlCharacter);
    }

    let open = value.find('<');
    let close = value.rfind('>');
    match (open, close) {
        (None, None) => Ok((0, value.len())),
        (Some(open), Some(close)) if open < close && close == value.len() - 1 => {
            if value[open + 1..].contains('<') || value[..close].contains('>') {
                return Err(AddressError::UnbalancedBrackets);
            }
            validate_display_name(value[..open].trim())?;
            Ok((open + 1, close))
        }
        _ => Err(AddressError::UnbalancedBrackets),
    }
}

/// An unquoted display name carrying a list separator or an `@` would be read by the
/// provider as extra recipients.
fn validate_display_name(name: &str) -> Result<(), AddressError> {
    if let Some(inner) = name.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        if inner.contains(&['"', '\\'][..]) {
            return Err(AddressError::UnquotedDisplayName);
        }
        return Ok(());
    }
    if name.contains(&DISPLAY_NAME_SPECIALS[..]) {
        return Err(AddressError::UnquotedDisplayName);
    }
    Ok(())
}

fn validate_addr_spec(spec: &str) -> Result<(), AddressError> {
    if spec.is_empty() {
        return Err(AddressError::Empty);
    }
    if spec.chars().any(char::is_whitespace) {
        return Err(AddressError::Whitespace);
    }

    let mut parts = spec.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AddressError::AtSign);
    };

    if local.is_empty() {
        return Err(AddressError::EmptyLocalPart);
    }
    if local.contains(&LOCAL_PART_SPECIALS[..]) {
        return Err(AddressError::LocalPartSpecials);
    }
    if !is_valid_domain(domain) {
        return Err(AddressError::InvalidDomain(domain.to_owned()));
    }
    Ok(())
}

pub(crate) fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|ch| ch.is_alphanumeric() || ch == '-')
        })
}
