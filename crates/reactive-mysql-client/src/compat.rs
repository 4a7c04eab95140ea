//! Deprecated-setting shims.
//!
//! Each shim returns the effective value together with whether a deprecated
//! setting took part, so callers decide how to report it.

/// Message logged when the driver-level statement-cache flag is used.
pub const CACHE_PREPARED_STATEMENTS_DEPRECATION: &str = "datasource.reactive.mysql.cache-prepared-statements is deprecated, use datasource.reactive.cache-prepared-statements instead";

/// Message logged when `thread-local` is configured.
pub const THREAD_LOCAL_DEPRECATION: &str = "configuration element 'thread-local' on reactive datasource connections is deprecated and will be ignored; the started pool is always based on a per-thread separate pool";

/// Outcome of a compatibility step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shimmed<T> {
    /// The value to use.
    pub value: T,
    /// Whether a deprecated setting was present and a warning is due.
    pub deprecated: bool,
}

/// Statement caching: the deprecated driver-level flag wins over the generic one when set.
pub fn cache_prepared_statements(generic: bool, driver: Option<bool>) -> Shimmed<bool> {
    match driver {
        Some(value) => Shimmed {
            value,
            deprecated: true,
        },
        None => Shimmed {
            value: generic,
            deprecated: false,
        },
    }
}

/// Thread affinity no longer affects pooling; any configured value is ignored.
pub fn thread_local(configured: Option<bool>) -> Shimmed<()> {
    Shimmed {
        value: (),
        deprecated: configured.is_some(),
    }
}
