//! Per-data-source bootstrap.
//!
//! [`MySqlPoolRecorder`] ties the resolvers, the pool factory and the shutdown
//! context together: for each configured data source it resolves options,
//! builds the pool and schedules its close.

use std::collections::BTreeMap;

use reactive_mysql_config::RuntimeConfig;
use serde::Serialize;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::connect_options::{MySqlConnectOptions, resolve_connect_options};
use crate::credentials::CredentialsProviderRegistry;
use crate::error::{PoolError, PoolResult};
use crate::factory::{PoolCreatorRegistry, PoolFactory};
use crate::pool::MySqlPool;
use crate::pool_options::{PoolOptions, resolve_pool_options};
use crate::shutdown::{ShutdownContext, register_pool_close};

/// Options resolved for one data source, before any pool exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDataSource {
    pub name: String,
    pub pool_options: PoolOptions,
    pub connect_options: MySqlConnectOptions,
}

#[derive(Debug, Clone, Default)]
pub struct MySqlPoolRecorder {
    credentials: CredentialsProviderRegistry,
    factory: PoolFactory,
}

impl MySqlPoolRecorder {
    pub fn new(credentials: CredentialsProviderRegistry, creators: PoolCreatorRegistry) -> Self {
        Self {
            credentials,
            factory: PoolFactory::new(creators),
        }
    }

    /// Resolve pool and connect options of `data_source_name` without building a pool.
    pub fn resolve(
        &self,
        data_source_name: &str,
        config: &RuntimeConfig,
        event_loop_count: Option<i32>,
    ) -> PoolResult<ResolvedDataSource> {
        let settings = config
            .data_source(data_source_name)
            .ok_or_else(|| PoolError::DataSourceNotConfigured(data_source_name.to_string()))?;
        let reactive = &settings.reactive.pool;
        let mysql = &settings.reactive.mysql;

        let pool_options = resolve_pool_options(reactive, mysql, event_loop_count);
        let connect_options = resolve_connect_options(
            data_source_name,
            &settings.data_source,
            reactive,
            mysql,
            &self.credentials,
        )?;
        debug!(datasource = data_source_name, "mysql options resolved");

        Ok(ResolvedDataSource {
            name: data_source_name.to_string(),
            pool_options,
            connect_options,
        })
    }

    /// Build the pool of one data source and register its close with `shutdown`.
    pub fn configure_mysql_pool(
        &self,
        runtime: &Handle,
        event_loop_count: Option<i32>,
        data_source_name: &str,
        config: &RuntimeConfig,
        shutdown: &ShutdownContext,
    ) -> PoolResult<MySqlPool> {
        let resolved = self.resolve(data_source_name, config, event_loop_count)?;
        let pool = self.factory.create_pool(
            runtime,
            resolved.pool_options,
            resolved.connect_options,
            data_source_name,
        )?;
        register_pool_close(shutdown, data_source_name, &pool);
        Ok(pool)
    }

    /// Build the pools of every configured data source, default first.
    ///
    /// Stops at the first failure; pools built before it stay registered
    /// with `shutdown`.
    pub fn configure_all(
        &self,
        runtime: &Handle,
        event_loop_count: Option<i32>,
        config: &RuntimeConfig,
        shutdown: &ShutdownContext,
    ) -> PoolResult<BTreeMap<String, MySqlPool>> {
        let mut pools = BTreeMap::new();
        for name in config.data_source_names() {
            let pool = self.configure_mysql_pool(runtime, event_loop_count, &name, config, shutdown)?;
            pools.insert(name, pool);
        }
        info!(pools = pools.len(), "mysql pools configured");
        Ok(pools)
    }
}
