//! Credentials provider lookup.
//!
//! A data source may name a credentials provider key (`credentials-provider`)
//! and, optionally, which registered provider to ask (`credentials-provider-name`).
//! Providers are injected through a [`CredentialsProviderRegistry`] built at
//! application composition time.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use reactive_mysql_config::DataSourceConfig;
use tracing::debug;

use crate::error::{PoolError, PoolResult};

/// Credential map key holding the user name.
pub const USER_PROPERTY_NAME: &str = "user";

/// Credential map key holding the password.
pub const PASSWORD_PROPERTY_NAME: &str = "password";

/// External source of user/password pairs, looked up by logical name.
pub trait CredentialsProvider: Send + Sync {
    /// Fetch the credentials stored under `credentials_provider_name`.
    ///
    /// Keys are [`USER_PROPERTY_NAME`] and [`PASSWORD_PROPERTY_NAME`]; either may be absent.
    fn get_credentials(&self, credentials_provider_name: &str)
        -> anyhow::Result<HashMap<String, String>>;
}

/// Registered credentials providers: one default provider plus any number of named ones.
#[derive(Clone, Default)]
pub struct CredentialsProviderRegistry {
    default: Option<Arc<dyn CredentialsProvider>>,
    named: HashMap<String, Arc<dyn CredentialsProvider>>,
}

impl fmt::Debug for CredentialsProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut named: Vec<&String> = self.named.keys().collect();
        named.sort();
        f.debug_struct("CredentialsProviderRegistry")
            .field("default", &self.default.is_some())
            .field("named", &named)
            .finish()
    }
}

impl CredentialsProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the provider used when no provider name is configured.
    pub fn with_default(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.default = Some(provider);
        self
    }

    /// Builder method: register a provider under `name`.
    pub fn with_named(mut self, name: impl Into<String>, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.named.insert(name.into(), provider);
        self
    }

    /// Find a provider by registration name; `None` selects the default provider.
    pub fn find(&self, name: Option<&str>) -> PoolResult<Arc<dyn CredentialsProvider>> {
        let found = match name {
            Some(name) => self.named.get(name),
            None => self.default.as_ref(),
        };
        found
            .cloned()
            .ok_or_else(|| PoolError::ProviderNotFound(name.unwrap_or("<default>").to_string()))
    }
}

/// Credentials returned by a provider. Absent fields leave configured values untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            user: map.get(USER_PROPERTY_NAME).cloned(),
            password: map.get(PASSWORD_PROPERTY_NAME).cloned(),
        }
    }

    /// Override `user` and `password` with whichever fields these credentials carry.
    pub fn apply(&self, user: &mut String, password: &mut String) {
        if let Some(u) = &self.user {
            user.clone_from(u);
        }
        if let Some(p) = &self.password {
            password.clone_from(p);
        }
    }
}

/// Fetch the credentials for a data source, if it names a credentials provider.
///
/// Returns `Ok(None)` when no provider is configured.
pub fn resolve_credentials(
    registry: &CredentialsProviderRegistry,
    config: &DataSourceConfig,
) -> PoolResult<Option<Credentials>> {
    let Some(name) = config.credentials_provider.as_deref() else {
        return Ok(None);
    };

    let provider = registry.find(config.credentials_provider_name.as_deref())?;
    let map = provider
        .get_credentials(name)
        .map_err(|source| PoolError::CredentialsLookup {
            provider: name.to_string(),
            source,
        })?;

    let credentials = Credentials::from_map(&map);
    debug!(
        provider = name,
        user = credentials.user.is_some(),
        password = credentials.password.is_some(),
        "fetched credentials from provider"
    );
    Ok(Some(credentials))
}
