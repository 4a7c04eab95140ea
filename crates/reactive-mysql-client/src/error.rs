//! Bootstrap error types.
//!
//! Every variant is fatal: pool bootstrap stops at the first error.

use thiserror::Error;

/// Errors raised while resolving options or constructing a pool.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("credentials provider not found: {0}")]
    ProviderNotFound(String),

    #[error("credentials lookup for '{provider}' failed: {source}")]
    CredentialsLookup {
        provider: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid connection uri: {0}")]
    InvalidUrl(String),

    #[error("data source not configured: {0}")]
    DataSourceNotConfigured(String),

    #[error("pool creator failed: {0}")]
    ExtensionConstruction(#[source] anyhow::Error),
}

impl PoolError {
    /// Wrap a failure raised by a custom pool creator.
    pub fn extension(source: impl Into<anyhow::Error>) -> Self {
        PoolError::ExtensionConstruction(source.into())
    }
}

pub type PoolResult<T> = Result<T, PoolError>;
