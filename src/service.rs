//! Sub-config access for service configs

use figment::value::{Dict, Value};
use serde::Serialize;

use crate::error::ConfigError;

/// A loaded service config that hands out sections of itself.
///
/// Implement it with an empty `impl` block; the provided method works on any
/// serializable config.
pub trait ServiceConfig: Serialize {
    /// Return the table stored under the dotted `key` (e.g. `db` or `db.pool`).
    fn sub_config(&self, key: &str) -> Result<Dict, ConfigError> {
        let value = Value::serialize(self).map_err(|e| {
            ConfigError::InvalidArgument(format!("config cannot be serialized: {e}"))
        })?;
        match value.find(key) {
            Some(Value::Dict(_, dict)) => Ok(dict),
            Some(_) => Err(ConfigError::SubConfigNotATable(key.to_string())),
            None => Err(ConfigError::SubConfigNotFound(key.to_string())),
        }
    }
}
