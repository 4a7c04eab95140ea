//! reactive-mysql-config: configuration layers for reactive MySQL pools.
//!
//! Three independently optional layers describe a data source:
//! - **[`DataSourceConfig`]**: generic credentials and credentials-provider references
//! - **[`ReactivePoolConfig`]**: generic reactive-pool settings (sizing, TLS, reconnects)
//! - **[`MySqlConfig`]**: MySQL driver-specific overrides
//!
//! [`RuntimeConfig`] groups them per data-source name and is loaded from TOML.

pub mod config;
pub mod duration;
pub mod tls;
pub mod types;

pub use config::{
    DataSourceConfig, DataSourceSettings, MySqlConfig, ReactivePoolConfig, ReactiveSettings,
    RuntimeConfig,
};
pub use tls::{KeyStoreConfig, PemKeyCertConfig, PemTrustCertConfig};
pub use types::*;
