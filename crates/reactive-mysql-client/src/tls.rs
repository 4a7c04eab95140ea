//! TLS material for MySQL connections.
//!
//! Each supported store format has its own trust slot and key/cert slot, so
//! configuring one format never clears another. The options only carry paths
//! and store passwords; the connection layer reads and validates the files.

use std::fmt;
use std::path::PathBuf;

use reactive_mysql_config::{KeyStoreConfig, PemKeyCertConfig, PemTrustCertConfig, ReactivePoolConfig};
use serde::Serialize;

/// Trusted PEM certificates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PemTrustOptions {
    pub cert_paths: Vec<PathBuf>,
}

/// PEM private keys with their certificate chains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PemKeyCertOptions {
    pub key_paths: Vec<PathBuf>,
    pub cert_paths: Vec<PathBuf>,
}

/// A JKS or PFX store file and its password.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyStoreOptions {
    pub path: Option<PathBuf>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl fmt::Debug for KeyStoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStoreOptions")
            .field("path", &self.path)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl From<&KeyStoreConfig> for KeyStoreOptions {
    fn from(config: &KeyStoreConfig) -> Self {
        Self {
            path: config.path.as_ref().map(PathBuf::from),
            password: config.password.clone(),
        }
    }
}

/// Trust and key material, one slot per store format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TlsOptions {
    pub pem_trust: Option<PemTrustOptions>,
    pub jks_trust: Option<KeyStoreOptions>,
    pub pfx_trust: Option<KeyStoreOptions>,
    pub pem_key_cert: Option<PemKeyCertOptions>,
    pub jks_key_cert: Option<KeyStoreOptions>,
    pub pfx_key_cert: Option<KeyStoreOptions>,
}

impl TlsOptions {
    /// Collect every enabled trust and key store of a reactive pool configuration.
    pub fn from_config(config: &ReactivePoolConfig) -> Self {
        let mut tls = Self::default();

        tls.configure_pem_trust(&config.trust_certificate_pem);
        tls.configure_jks_trust(&config.trust_certificate_jks);
        tls.configure_pfx_trust(&config.trust_certificate_pfx);

        tls.configure_pem_key_cert(&config.key_certificate_pem);
        tls.configure_jks_key_cert(&config.key_certificate_jks);
        tls.configure_pfx_key_cert(&config.key_certificate_pfx);

        tls
    }

    pub fn configure_pem_trust(&mut self, config: &PemTrustCertConfig) {
        if config.enabled {
            self.pem_trust = Some(PemTrustOptions {
                cert_paths: config.certs.iter().map(PathBuf::from).collect(),
            });
        }
    }

    pub fn configure_jks_trust(&mut self, config: &KeyStoreConfig) {
        if config.enabled {
            self.jks_trust = Some(config.into());
        }
    }

    pub fn configure_pfx_trust(&mut self, config: &KeyStoreConfig) {
        if config.enabled {
            self.pfx_trust = Some(config.into());
        }
    }

    pub fn configure_pem_key_cert(&mut self, config: &PemKeyCertConfig) {
        if config.enabled {
            self.pem_key_cert = Some(PemKeyCertOptions {
                key_paths: config.keys.iter().map(PathBuf::from).collect(),
                cert_paths: config.certs.iter().map(PathBuf::from).collect(),
            });
        }
    }

    pub fn configure_jks_key_cert(&mut self, config: &KeyStoreConfig) {
        if config.enabled {
            self.jks_key_cert = Some(config.into());
        }
    }

    pub fn configure_pfx_key_cert(&mut self, config: &KeyStoreConfig) {
        if config.enabled {
            self.pfx_key_cert = Some(config.into());
        }
    }

    /// Whether any trust store is configured.
    pub fn has_trust_material(&self) -> bool {
        self.pem_trust.is_some() || self.jks_trust.is_some() || self.pfx_trust.is_some()
    }

    /// Whether any client key/certificate is configured.
    pub fn has_key_material(&self) -> bool {
        self.pem_key_cert.is_some() || self.jks_key_cert.is_some() || self.pfx_key_cert.is_some()
    }
}
