//! Shared value types: data-source naming and the MySQL SSL mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name under which the unnamed (default) data source is registered.
pub const DEFAULT_DATASOURCE_NAME: &str = "<default>";

/// Whether `name` designates the default data source.
pub fn is_default(name: &str) -> bool {
    name == DEFAULT_DATASOURCE_NAME
}

/// Transport security negotiation mode, from no TLS up to full identity verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    /// Never use TLS.
    #[default]
    Disabled,
    /// Use TLS if the server supports it, fall back to plaintext otherwise.
    Preferred,
    /// Require TLS, without verifying the server certificate.
    Required,
    /// Require TLS and verify the server certificate against the trust store.
    VerifyCa,
    /// Like `VerifyCa`, and also verify the server hostname against its certificate.
    VerifyIdentity,
}

impl SslMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disabled => "disabled",
            SslMode::Preferred => "preferred",
            SslMode::Required => "required",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyIdentity => "verify-identity",
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ssl mode: {0}")]
pub struct ParseSslModeError(pub String);

impl FromStr for SslMode {
    type Err = ParseSslModeError;

    /// Accepts the kebab-case names as well as `VERIFY_IDENTITY`-style spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "disabled" => Ok(SslMode::Disabled),
            "preferred" => Ok(SslMode::Preferred),
            "required" => Ok(SslMode::Required),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-identity" => Ok(SslMode::VerifyIdentity),
            _ => Err(ParseSslModeError(s.to_string())),
        }
    }
}
