//! Pool-level options: sizing, idle handling, sharing and event-loop spread.

use std::time::Duration;

use reactive_mysql_config::{MySqlConfig, ReactivePoolConfig};
use serde::Serialize;
use tracing::debug;

/// Unit a [`Timeout`] value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
}

/// A timeout value together with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timeout {
    pub value: u64,
    pub unit: TimeUnit,
}

impl Timeout {
    pub fn millis(value: u64) -> Self {
        Self {
            value,
            unit: TimeUnit::Milliseconds,
        }
    }

    pub fn seconds(value: u64) -> Self {
        Self {
            value,
            unit: TimeUnit::Seconds,
        }
    }

    pub fn as_duration(&self) -> Duration {
        match self.unit {
            TimeUnit::Milliseconds => Duration::from_millis(self.value),
            TimeUnit::Seconds => Duration::from_secs(self.value),
        }
    }
}

/// Resolved pool options. Unset fields leave the pool's own defaults in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolOptions {
    pub max_size: u32,
    pub idle_timeout: Option<Timeout>,
    pub shared: bool,
    /// Shared pool name; unset shares under the default name.
    pub name: Option<String>,
    pub event_loop_size: Option<u32>,
    pub connection_timeout: Option<Timeout>,
}

impl PoolOptions {
    pub fn new(max_size: u32) -> Self {
        Self {
            max_size,
            idle_timeout: None,
            shared: false,
            name: None,
            event_loop_size: None,
            connection_timeout: None,
        }
    }
}

/// Saturating conversion of a duration to whole milliseconds.
pub(crate) fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Merge the reactive and MySQL layers into pool options.
///
/// `default_event_loop_count` is the process-wide event-loop count, used when
/// the data source does not set its own `event-loop-size`.
pub fn resolve_pool_options(
    reactive: &ReactivePoolConfig,
    mysql: &MySqlConfig,
    default_event_loop_count: Option<i32>,
) -> PoolOptions {
    let mut options = PoolOptions::new(reactive.max_size);

    if let Some(idle_timeout) = reactive.idle_timeout {
        options.idle_timeout = Some(Timeout::millis(duration_millis(idle_timeout)));
    }

    if reactive.shared {
        options.shared = true;
        options.name = reactive.name.clone();
    } else if let Some(name) = &reactive.name {
        debug!(name = %name, "pool name ignored because the pool is not shared");
    }

    options.event_loop_size = reactive
        .event_loop_size
        .or(default_event_loop_count)
        .map(|size| size.max(0) as u32);

    if let Some(timeout) = mysql.connection_timeout {
        options.connection_timeout = Some(Timeout::seconds(u64::from(timeout)));
    }

    options
}
