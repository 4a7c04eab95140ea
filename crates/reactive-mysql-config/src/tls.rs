//! Trust-store and key-store references.
//!
//! These only name the material (paths and store passwords). Loading and
//! validating certificates is left to the connection layer. Every store
//! carries an `enabled` flag; a store that is not enabled is not supplied.

use std::fmt;

use serde::Deserialize;

/// PEM trust certificates (`trust-certificate-pem`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PemTrustCertConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Paths of the trusted certificate files.
    #[serde(default)]
    pub certs: Vec<String>,
}

/// PEM key/certificate pairs (`key-certificate-pem`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PemKeyCertConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Paths of the private key files.
    #[serde(default)]
    pub keys: Vec<String>,
    /// Paths of the certificate files, matched to `keys` by position.
    #[serde(default)]
    pub certs: Vec<String>,
}

/// A password-protected store file, used for both JKS and PFX (PKCS#12) stores.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyStoreConfig {
    #[serde(default)]
    pub enabled: bool,
    pub path: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for KeyStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStoreConfig")
            .field("enabled", &self.enabled)
            .field("path", &self.path)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
