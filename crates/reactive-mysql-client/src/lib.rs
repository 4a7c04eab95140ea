//! reactive-mysql-client: bootstraps reactive MySQL pools from layered configuration.
//!
//! Per data source, bootstrap runs:
//! 1. **Credentials** ([`credentials`]): optional lookup through a registered provider
//! 2. **TLS** ([`tls`]): trust and key material from PEM, JKS and PFX stores
//! 3. **Pool options** ([`pool_options`]): sizing, idle timeout, sharing, event loops
//! 4. **Connect options** ([`connect_options`]): URI seed plus every configuration layer
//! 5. **Construction** ([`factory`]): a registered creator or the standard pool
//! 6. **Lifecycle** ([`shutdown`]): the pool's close runs at application shutdown
//!
//! [`MySqlPoolRecorder`] drives these steps for each configured data source.

pub mod compat;
pub mod connect_options;
pub mod credentials;
pub mod error;
pub mod factory;
pub mod pool;
pub mod pool_options;
pub mod recorder;
pub mod shutdown;
pub mod tls;

pub use connect_options::{MySqlConnectOptions, resolve_connect_options};
pub use credentials::{
    Credentials, CredentialsProvider, CredentialsProviderRegistry, resolve_credentials,
};
pub use error::{PoolError, PoolResult};
pub use factory::{MySqlPoolCreator, PoolCreationInput, PoolCreatorRegistry, PoolFactory};
pub use pool::MySqlPool;
pub use pool_options::{PoolOptions, TimeUnit, Timeout, resolve_pool_options};
pub use recorder::{MySqlPoolRecorder, ResolvedDataSource};
pub use shutdown::{ShutdownContext, register_pool_close};
pub use tls::TlsOptions;
