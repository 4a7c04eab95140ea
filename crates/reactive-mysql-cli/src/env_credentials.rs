//! Credentials read from environment variables.
//!
//! A provider key such as `orders-db` maps to `ORDERS_DB_USER` and
//! `ORDERS_DB_PASSWORD`.

use std::collections::HashMap;
use std::ffi::OsString;

use reactive_mysql_client::CredentialsProvider;
use reactive_mysql_client::credentials::{PASSWORD_PROPERTY_NAME, USER_PROPERTY_NAME};

pub struct EnvCredentialsProvider {
    vars: HashMap<String, String>,
}

impl EnvCredentialsProvider {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Keep the variables whose name and value are both valid UTF-8.
    pub fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        Self::from_vars(
            vars.into_iter()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
        )
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
        }
    }
}

fn env_prefix(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

impl CredentialsProvider for EnvCredentialsProvider {
    fn get_credentials(&self, credentials_provider_name: &str) -> anyhow::Result<HashMap<String, String>> {
        let prefix = env_prefix(credentials_provider_name);
        let mut credentials = HashMap::new();
        if let Some(user) = self.vars.get(&format!("{prefix}_USER")) {
            credentials.insert(USER_PROPERTY_NAME.to_string(), user.clone());
        }
        if let Some(password) = self.vars.get(&format!("{prefix}_PASSWORD")) {
            credentials.insert(PASSWORD_PROPERTY_NAME.to_string(), password.clone());
        }
        Ok(credentials)
    }
}
