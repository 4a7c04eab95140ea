pub mod resolve;
pub mod run;

use std::sync::Arc;

use reactive_mysql_client::{CredentialsProviderRegistry, MySqlPoolRecorder, PoolCreatorRegistry};

use crate::env_credentials::EnvCredentialsProvider;

/// Recorder wired with the environment-backed default credentials provider.
pub fn recorder() -> MySqlPoolRecorder {
    let credentials = CredentialsProviderRegistry::new()
        .with_default(Arc::new(EnvCredentialsProvider::from_env()));
    MySqlPoolRecorder::new(credentials, PoolCreatorRegistry::new())
}

/// Event-loop count used when `--event-loops` is not given: twice the available parallelism.
pub fn event_loop_count(explicit: Option<i32>) -> i32 {
    explicit.unwrap_or_else(|| {
        let cpus = std::thread::available_parallelism().map_or(1, |n| n.get());
        i32::try_from(cpus.saturating_mul(2)).unwrap_or(i32::MAX)
    })
}
