//! Pool construction dispatch.
//!
//! Applications can replace the standard pool constructor per data source by
//! registering a [`MySqlPoolCreator`] in a [`PoolCreatorRegistry`]:
//!
//! ```text
//! PoolFactory::create_pool(name)
//!   → exactly one creator registered for name → creator.create(input)
//!   → none (or several, ambiguous)            → MySqlPool::pool(...)
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use reactive_mysql_config::is_default;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::connect_options::MySqlConnectOptions;
use crate::error::PoolResult;
use crate::pool::MySqlPool;
use crate::pool_options::PoolOptions;

/// Everything a custom creator needs to build a pool.
pub struct PoolCreationInput {
    runtime: Handle,
    pool_options: PoolOptions,
    connect_options: MySqlConnectOptions,
}

impl PoolCreationInput {
    pub fn new(runtime: Handle, pool_options: PoolOptions, connect_options: MySqlConnectOptions) -> Self {
        Self {
            runtime,
            pool_options,
            connect_options,
        }
    }

    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    pub fn pool_options(&self) -> &PoolOptions {
        &self.pool_options
    }

    pub fn connect_options(&self) -> &MySqlConnectOptions {
        &self.connect_options
    }
}

/// Custom pool construction hook.
///
/// Errors are returned to the caller unchanged and abort bootstrap; use
/// [`PoolError::extension`](crate::PoolError::extension) to wrap foreign errors.
pub trait MySqlPoolCreator: Send + Sync {
    fn create(&self, input: &PoolCreationInput) -> PoolResult<MySqlPool>;
}

impl<F> MySqlPoolCreator for F
where
    F: Fn(&PoolCreationInput) -> PoolResult<MySqlPool> + Send + Sync,
{
    fn create(&self, input: &PoolCreationInput) -> PoolResult<MySqlPool> {
        self(input)
    }
}

/// Creators registered for the default data source and per data-source name.
#[derive(Clone, Default)]
pub struct PoolCreatorRegistry {
    default: Vec<Arc<dyn MySqlPoolCreator>>,
    named: HashMap<String, Vec<Arc<dyn MySqlPoolCreator>>>,
}

impl fmt::Debug for PoolCreatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut named: Vec<(&String, usize)> =
            self.named.iter().map(|(name, list)| (name, list.len())).collect();
        named.sort();
        f.debug_struct("PoolCreatorRegistry")
            .field("default", &self.default.len())
            .field("named", &named)
            .finish()
    }
}

impl PoolCreatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a creator for the named data source;
    /// [`DEFAULT_DATASOURCE_NAME`](reactive_mysql_config::DEFAULT_DATASOURCE_NAME)
    /// registers for the default one.
    pub fn register(&mut self, data_source_name: impl Into<String>, creator: Arc<dyn MySqlPoolCreator>) {
        let name = data_source_name.into();
        if is_default(&name) {
            self.default.push(creator);
        } else {
            self.named.entry(name).or_default().push(creator);
        }
    }

    /// Register a creator for the default data source.
    pub fn register_default(&mut self, creator: Arc<dyn MySqlPoolCreator>) {
        self.default.push(creator);
    }

    /// Builder method: register a creator for the named data source.
    pub fn with_creator(mut self, data_source_name: impl Into<String>, creator: Arc<dyn MySqlPoolCreator>) -> Self {
        self.register(data_source_name, creator);
        self
    }

    /// Creators registered for `data_source_name`.
    pub fn lookup(&self, data_source_name: &str) -> &[Arc<dyn MySqlPoolCreator>] {
        if is_default(data_source_name) {
            self.default.as_slice()
        } else {
            self.named.get(data_source_name).map(Vec::as_slice).unwrap_or(&[])
        }
    }
}

/// Builds pools, through a registered creator when one applies.
#[derive(Debug, Clone, Default)]
pub struct PoolFactory {
    creators: PoolCreatorRegistry,
}

impl PoolFactory {
    pub fn new(creators: PoolCreatorRegistry) -> Self {
        Self { creators }
    }

    /// Build the pool for `data_source_name` from its resolved options.
    pub fn create_pool(
        &self,
        runtime: &Handle,
        pool_options: PoolOptions,
        connect_options: MySqlConnectOptions,
        data_source_name: &str,
    ) -> PoolResult<MySqlPool> {
        match self.creators.lookup(data_source_name) {
            [creator] => {
                debug!(datasource = data_source_name, "building mysql pool with custom creator");
                let input = PoolCreationInput::new(runtime.clone(), pool_options, connect_options);
                creator.create(&input)
            }
            [] => Ok(MySqlPool::pool(runtime.clone(), connect_options, pool_options)),
            several => {
                warn!(
                    datasource = data_source_name,
                    creators = several.len(),
                    "ambiguous mysql pool creators, using the standard pool"
                );
                Ok(MySqlPool::pool(runtime.clone(), connect_options, pool_options))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use reactive_mysql_config::DEFAULT_DATASOURCE_NAME;

    use super::*;
    use crate::error::PoolError;

    struct CountingCreator {
        calls: AtomicUsize,
    }

    impl CountingCreator {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl MySqlPoolCreator for CountingCreator {
        fn create(&self, input: &PoolCreationInput) -> PoolResult<MySqlPool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut pool_options = input.pool_options().clone();
            pool_options.max_size = 99;
            Ok(MySqlPool::pool(
                input.runtime().clone(),
                input.connect_options().clone(),
                pool_options,
            ))
        }
    }

    fn options() -> (PoolOptions, MySqlConnectOptions) {
        (PoolOptions::new(4), MySqlConnectOptions::default())
    }

    #[tokio::test]
    async fn no_creator_uses_standard_pool() {
        let factory = PoolFactory::default();
        let (pool_options, connect_options) = options();

        let pool = factory
            .create_pool(&Handle::current(), pool_options.clone(), connect_options.clone(), "orders")
            .unwrap();
        let direct = MySqlPool::pool(Handle::current(), connect_options, pool_options);

        assert_eq!(pool.pool_options(), direct.pool_options());
        assert_eq!(pool.connect_options(), direct.connect_options());
    }

    #[tokio::test]
    async fn creator_is_used_for_its_data_source_only() {
        let creator = CountingCreator::new();
        let factory = PoolFactory::new(
            PoolCreatorRegistry::new().with_creator("orders", creator.clone()),
        );

        let (pool_options, connect_options) = options();
        let orders = factory
            .create_pool(&Handle::current(), pool_options.clone(), connect_options.clone(), "orders")
            .unwrap();
        let reports = factory
            .create_pool(&Handle::current(), pool_options, connect_options, "reports")
            .unwrap();

        assert_eq!(creator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(orders.pool_options().max_size, 99);
        assert_eq!(reports.pool_options().max_size, 4);
    }

    #[tokio::test]
    async fn default_creator_is_used_for_default_data_source() {
        let creator = CountingCreator::new();
        let mut registry = PoolCreatorRegistry::new();
        registry.register_default(creator.clone());
        let factory = PoolFactory::new(registry);

        let (pool_options, connect_options) = options();
        let pool = factory
            .create_pool(&Handle::current(), pool_options, connect_options, DEFAULT_DATASOURCE_NAME)
            .unwrap();

        assert_eq!(creator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(pool.pool_options().max_size, 99);
    }

    #[test]
    fn default_slot_is_separate_from_named_creators() {
        let by_name = CountingCreator::new();
        let by_default = CountingCreator::new();
        let mut registry = PoolCreatorRegistry::new();
        registry.register(DEFAULT_DATASOURCE_NAME, by_name);
        registry.register_default(by_default);
        registry.register("orders", CountingCreator::new());

        assert_eq!(registry.lookup(DEFAULT_DATASOURCE_NAME).len(), 2);
        assert_eq!(registry.lookup("orders").len(), 1);
        assert!(registry.lookup("reports").is_empty());
    }

    #[tokio::test]
    async fn ambiguous_creators_fall_back_to_standard_pool() {
        let first = CountingCreator::new();
        let second = CountingCreator::new();
        let factory = PoolFactory::new(
            PoolCreatorRegistry::new()
                .with_creator("orders", first.clone())
                .with_creator("orders", second.clone()),
        );

        let (pool_options, connect_options) = options();
        let pool = factory
            .create_pool(&Handle::current(), pool_options, connect_options, "orders")
            .unwrap();

        assert_eq!(first.calls.load(Ordering::SeqCst), 0);
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pool.pool_options().max_size, 4);
    }

    #[tokio::test]
    async fn creator_errors_propagate_unchanged() {
        let failing = |_: &PoolCreationInput| -> PoolResult<MySqlPool> {
            Err(PoolError::extension(anyhow::anyhow!("driver unavailable")))
        };
        let factory =
            PoolFactory::new(PoolCreatorRegistry::new().with_creator("orders", Arc::new(failing)));

        let (pool_options, connect_options) = options();
        let err = factory
            .create_pool(&Handle::current(), pool_options, connect_options, "orders")
            .unwrap_err();

        match err {
            PoolError::ExtensionConstruction(source) => {
                assert_eq!(source.to_string(), "driver unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn creator_sees_resolved_options() {
        let creator = |input: &PoolCreationInput| -> PoolResult<MySqlPool> {
            assert_eq!(input.pool_options().max_size, 4);
            assert_eq!(input.connect_options().host, "localhost");
            Ok(MySqlPool::pool(
                input.runtime().clone(),
                input.connect_options().clone(),
                input.pool_options().clone(),
            ))
        };
        let factory =
            PoolFactory::new(PoolCreatorRegistry::new().with_creator("orders", Arc::new(creator)));

        let (pool_options, connect_options) = options();
        assert!(
            factory
                .create_pool(&Handle::current(), pool_options, connect_options, "orders")
                .is_ok()
        );
    }
}
