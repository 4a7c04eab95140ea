//! MySQL pool handle.
//!
//! The handle owns the resolved options and the runtime it was built on.
//! Connection acquisition and the wire protocol belong to the connection
//! layer behind it; this type fixes the options the pool runs with and its
//! close state. Clones share the same pool.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::connect_options::MySqlConnectOptions;
use crate::pool_options::PoolOptions;

struct PoolInner {
    runtime: Handle,
    connect_options: MySqlConnectOptions,
    pool_options: PoolOptions,
    closed: AtomicBool,
}

/// A MySQL connection pool.
#[derive(Clone)]
pub struct MySqlPool {
    inner: Arc<PoolInner>,
}

impl fmt::Debug for MySqlPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlPool")
            .field("connect_options", &self.inner.connect_options)
            .field("pool_options", &self.inner.pool_options)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl MySqlPool {
    /// Build a pool from resolved options. This is the standard constructor
    /// used whenever no custom creator is registered.
    pub fn pool(
        runtime: Handle,
        connect_options: MySqlConnectOptions,
        pool_options: PoolOptions,
    ) -> Self {
        info!(
            host = %connect_options.host,
            port = connect_options.port,
            database = %connect_options.database,
            max_size = pool_options.max_size,
            shared = pool_options.shared,
            metrics_name = connect_options.metrics_name.as_deref().unwrap_or(""),
            "mysql pool created"
        );
        Self {
            inner: Arc::new(PoolInner {
                runtime,
                connect_options,
                pool_options,
                closed: AtomicBool::new(false),
            }),
        }
    }

    pub fn connect_options(&self) -> &MySqlConnectOptions {
        &self.inner.connect_options
    }

    pub fn pool_options(&self) -> &PoolOptions {
        &self.inner.pool_options
    }

    /// Runtime the pool schedules its work on.
    pub fn runtime(&self) -> &Handle {
        &self.inner.runtime
    }

    /// Close the pool. Returns `true` for the call that actually closed it.
    pub fn close(&self) -> bool {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            debug!(
                metrics_name = self.inner.connect_options.metrics_name.as_deref().unwrap_or(""),
                "mysql pool already closed"
            );
            return false;
        }
        info!(
            metrics_name = self.inner.connect_options.metrics_name.as_deref().unwrap_or(""),
            "mysql pool closed"
        );
        true
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Whether both handles refer to the same pool.
    pub fn ptr_eq(&self, other: &MySqlPool) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
