//! Runtime configuration file parser.
//!
//! The default data source is configured under `[datasource]`, named ones
//! under `[datasources.<name>]`. Each carries the three configuration layers:
//!
//! ```toml
//! [datasource]
//! username = "app"
//!
//! [datasource.reactive]
//! url = "mysql://db:3306/app"
//! max-size = 20
//!
//! [datasource.reactive.mysql]
//! ssl-mode = "required"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::duration;
use crate::tls::{KeyStoreConfig, PemKeyCertConfig, PemTrustCertConfig};
use crate::types::{DEFAULT_DATASOURCE_NAME, SslMode, is_default};

/// Default delay between two reconnection attempts.
pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_secs(1);

fn default_reconnect_interval() -> Duration {
    DEFAULT_RECONNECT_INTERVAL
}

/// All configured data sources.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeConfig {
    /// The default (unnamed) data source.
    pub datasource: Option<DataSourceSettings>,
    /// Named data sources.
    #[serde(default)]
    pub datasources: BTreeMap<String, DataSourceSettings>,
}

/// The three configuration layers of a single data source.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceSettings {
    #[serde(flatten)]
    pub data_source: DataSourceConfig,
    pub reactive: ReactiveSettings,
}

/// `reactive` section: generic pool settings plus the `mysql` driver subsection.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactiveSettings {
    #[serde(flatten)]
    pub pool: ReactivePoolConfig,
    #[serde(default)]
    pub mysql: MySqlConfig,
}

/// Generic per-data-source settings.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DataSourceConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Key passed to the credentials provider to look up this data source's credentials.
    pub credentials_provider: Option<String>,
    /// Registration name of the credentials provider to use; unset selects the default provider.
    pub credentials_provider_name: Option<String>,
}

impl fmt::Debug for DataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("credentials_provider", &self.credentials_provider)
            .field("credentials_provider_name", &self.credentials_provider_name)
            .finish()
    }
}

/// Generic reactive-pool settings, shared by every reactive driver.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReactivePoolConfig {
    /// Connection URI. The legacy `vertx-reactive:` prefix is accepted.
    pub url: Option<String>,
    /// Maximum number of pooled connections.
    pub max_size: u32,
    /// Idle connections older than this are closed.
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub idle_timeout: Option<Duration>,
    /// Whether the pool may be shared with other consumers under a common name.
    #[serde(default)]
    pub shared: bool,
    /// Shared pool name. Only meaningful when `shared` is set.
    pub name: Option<String>,
    /// Number of event loops the pool spreads connections over. Negative values count as 0.
    pub event_loop_size: Option<i32>,
    /// Deprecated. Accepted and ignored.
    pub thread_local: Option<bool>,
    #[serde(default)]
    pub cache_prepared_statements: bool,
    #[serde(default)]
    pub trust_all: bool,
    #[serde(default)]
    pub trust_certificate_pem: PemTrustCertConfig,
    #[serde(default)]
    pub trust_certificate_jks: KeyStoreConfig,
    #[serde(default)]
    pub trust_certificate_pfx: KeyStoreConfig,
    #[serde(default)]
    pub key_certificate_pem: PemKeyCertConfig,
    #[serde(default)]
    pub key_certificate_jks: KeyStoreConfig,
    #[serde(default)]
    pub key_certificate_pfx: KeyStoreConfig,
    #[serde(default)]
    pub reconnect_attempts: u32,
    #[serde(
        default = "default_reconnect_interval",
        deserialize_with = "duration::deserialize"
    )]
    pub reconnect_interval: Duration,
    /// Required when the MySQL `ssl-mode` is `verify-identity`.
    pub hostname_verification_algorithm: Option<String>,
    /// Free-form connection properties, passed through unvalidated.
    #[serde(default)]
    pub additional_properties: BTreeMap<String, String>,
}

impl fmt::Debug for ReactivePoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactivePoolConfig")
            .field("url", &self.url.as_deref().map(redact_url))
            .field("max_size", &self.max_size)
            .field("idle_timeout", &self.idle_timeout)
            .field("shared", &self.shared)
            .field("name", &self.name)
            .field("event_loop_size", &self.event_loop_size)
            .field("thread_local", &self.thread_local)
            .field("cache_prepared_statements", &self.cache_prepared_statements)
            .field("trust_all", &self.trust_all)
            .field("trust_certificate_pem", &self.trust_certificate_pem)
            .field("trust_certificate_jks", &self.trust_certificate_jks)
            .field("trust_certificate_pfx", &self.trust_certificate_pfx)
            .field("key_certificate_pem", &self.key_certificate_pem)
            .field("key_certificate_jks", &self.key_certificate_jks)
            .field("key_certificate_pfx", &self.key_certificate_pfx)
            .field("reconnect_attempts", &self.reconnect_attempts)
            .field("reconnect_interval", &self.reconnect_interval)
            .field("hostname_verification_algorithm", &self.hostname_verification_algorithm)
            .field("additional_properties", &self.additional_properties)
            .finish()
    }
}

/// Mask the password in the userinfo part of a connection URL.
///
/// `mysql://app:secret@db/shop` becomes `mysql://app:***@db/shop`; URLs
/// without a password come back unchanged.
pub fn redact_url(url: &str) -> String {
    let authority_start = url.find("://").map_or(0, |i| i + 3);
    let rest = &url[authority_start..];
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return url.to_string();
    };
    let Some(colon) = rest[..at].find(':') else {
        return url.to_string();
    };
    format!(
        "{}{}:***{}",
        &url[..authority_start],
        &rest[..colon],
        &rest[at..]
    )
}

impl ReactivePoolConfig {
    /// Settings with the given pool size and every optional field at its default.
    pub fn with_max_size(max_size: u32) -> Self {
        Self {
            url: None,
            max_size,
            idle_timeout: None,
            shared: false,
            name: None,
            event_loop_size: None,
            thread_local: None,
            cache_prepared_statements: false,
            trust_all: false,
            trust_certificate_pem: PemTrustCertConfig::default(),
            trust_certificate_jks: KeyStoreConfig::default(),
            trust_certificate_pfx: KeyStoreConfig::default(),
            key_certificate_pem: PemKeyCertConfig::default(),
            key_certificate_jks: KeyStoreConfig::default(),
            key_certificate_pfx: KeyStoreConfig::default(),
            reconnect_attempts: 0,
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL,
            hostname_verification_algorithm: None,
            additional_properties: BTreeMap::new(),
        }
    }
}

/// MySQL driver-specific overrides (`reactive.mysql`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MySqlConfig {
    /// Deprecated in favour of `reactive.cache-prepared-statements`, but takes precedence when set.
    pub cache_prepared_statements: Option<bool>,
    pub charset: Option<String>,
    pub collation: Option<String>,
    pub pipelining_limit: Option<u32>,
    pub use_affected_rows: Option<bool>,
    pub ssl_mode: Option<SslMode>,
    /// Connection timeout, in seconds.
    pub connection_timeout: Option<u32>,
    pub authentication_plugin: Option<String>,
}

impl RuntimeConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: RuntimeConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Settings of the named data source; [`DEFAULT_DATASOURCE_NAME`] selects the default one.
    pub fn data_source(&self, name: &str) -> Option<&DataSourceSettings> {
        if is_default(name) {
            self.datasource.as_ref()
        } else {
            self.datasources.get(name)
        }
    }

    /// Names of every configured data source, the default one first.
    pub fn data_source_names(&self) -> Vec<String> {
        self.datasource
            .iter()
            .map(|_| DEFAULT_DATASOURCE_NAME.to_string())
            .chain(self.datasources.keys().cloned())
            .collect()
    }
}
