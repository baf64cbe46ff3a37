//! Environment variable overlay.
//!
//! Invariants:
//! - A key `db.url` under prefix `MYAPP` is read from `MYAPP_DB_URL`.
//! - Names are matched case-insensitively.
//! - Only keys already known to the merge context are overlaid.
//! - Empty or whitespace-only values are treated as unset for the config path.

use figment::providers::Env;
use figment::value::{Dict, Value};
use std::collections::HashMap;

/// Environment variable name for `key` under `prefix`.
pub(crate) fn env_key(prefix: &str, key: &str) -> String {
    let key = key.replace('.', "_").to_ascii_uppercase();
    if prefix.is_empty() {
        key
    } else {
        format!("{}_{}", prefix.to_ascii_uppercase(), key)
    }
}

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
///
/// A set value is returned as-is; trimming only decides blankness.
pub(crate) fn env_var_or_none(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Collect the dotted path of every leaf in `dict`.
pub(crate) fn leaf_keys(dict: &Dict) -> Vec<String> {
    let mut keys = Vec::new();
    collect_leaves(dict, "", &mut keys);
    keys
}

fn collect_leaves(dict: &Dict, parent: &str, keys: &mut Vec<String>) {
    for (name, value) in dict {
        let path = if parent.is_empty() { name.clone() } else { format!("{parent}.{name}") };
        match value {
            Value::Dict(_, nested) if !nested.is_empty() => collect_leaves(nested, &path, keys),
            _ => keys.push(path),
        }
    }
}

/// Look up the leaf at dotted `key`.
fn find_leaf<'a>(dict: &'a Dict, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut value = dict.get(parts.next()?)?;
    for part in parts {
        value = value.as_dict()?.get(part)?;
    }
    Some(value)
}

/// Collect env overrides for every key known to `layers`, highest layer first.
///
/// Env names are flattened with `_`, which is ambiguous, so the mapping runs
/// the other way: each known key is flattened and looked up. The first key
/// claiming a flattened name wins. Values for keys that hold text in the
/// highest layer defining them stay text; everything else is parsed, so
/// `7070` becomes a number.
pub(crate) fn overrides(prefix: &str, layers: &[&Dict]) -> Vec<(String, Value)> {
    let mut by_env_name: HashMap<String, String> = HashMap::new();
    for layer in layers {
        for key in leaf_keys(layer) {
            by_env_name.entry(key.replace('.', "_").to_ascii_lowercase()).or_insert(key);
        }
    }

    let provider =
        if prefix.is_empty() { Env::raw() } else { Env::prefixed(&format!("{prefix}_")) };
    provider
        .iter()
        .filter_map(|(name, raw)| {
            let key = by_env_name.get(&name.as_str().to_ascii_lowercase())?;
            let is_text = layers
                .iter()
                .find_map(|layer| find_leaf(layer, key))
                .is_some_and(|leaf| matches!(leaf, Value::String(..) | Value::Char(..)));
            let value = if is_text { Value::from(raw) } else { parse_value(raw) };
            Some((key.clone(), value))
        })
        .collect()
}

fn parse_value(raw: String) -> Value {
    match raw.parse::<Value>() {
        Ok(value) => value,
        Err(_) => Value::from(raw),
    }
}
