//! Configuration loading with CLI support.
//!
//! Merges a config file, environment variables and command-line flags into a
//! caller-owned struct with precedence flag > env > file > current value.

use figment::providers::Serialized;
use figment::value::{Dict, Value};
use figment::Figment;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::format::Format;

pub(crate) mod command;
pub(crate) mod env;

use command::{build_root_command, root_flags, CONFIG_FLAG};

/// Outcome of a successful [`Loader::load`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadResult {
    /// The destination is populated; carry on with startup.
    Continue,
    /// `--help` or `--version` was handled; exit without treating it as failure.
    Stop,
}

impl LoadResult {
    pub fn is_stop(self) -> bool {
        self == LoadResult::Stop
    }

    pub fn is_continue(self) -> bool {
        self == LoadResult::Continue
    }
}

/// Bootstraps a service config from file, environment and flags.
///
/// A loader holds no state between calls: each load builds its own command and
/// merge context, so the same value can be reused sequentially. Concurrent
/// loads are not supported because they read process-wide arguments and
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loader {
    name: String,
    short: String,
    long: String,
    config_path: PathBuf,
    env_prefix: String,
    format: Option<Format>,
}

impl Loader {
    /// Create a loader.
    ///
    /// - `name`: service name, also the name of the root command.
    /// - `short`, `long`: descriptions shown in `--help`.
    /// - `config_path`: file used when neither `--config` nor `<PREFIX>_CONFIG` is set.
    /// - `env_prefix`: prefix for environment variables (`APP` → `APP_LOG_LEVEL`).
    pub fn new(
        name: impl Into<String>,
        short: impl Into<String>,
        long: impl Into<String>,
        config_path: impl Into<PathBuf>,
        env_prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            short: short.into(),
            long: long.into(),
            config_path: config_path.into(),
            env_prefix: env_prefix.into(),
            format: None,
        }
    }

    /// Decode the config file as `format` regardless of its extension.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Load configuration into `cfg` using the process arguments.
    ///
    /// `print_version` is called with `out` when `--version` is given; see
    /// [`crate::plain_version_printer`] and [`crate::json_version_printer`].
    /// Help text is written to `out` as well.
    ///
    /// Returns [`LoadResult::Stop`] after `--help` or `--version`, and
    /// [`LoadResult::Continue`] once `cfg` holds the merged config. `cfg` is
    /// only written on `Continue`.
    pub fn load<T, P>(
        &self,
        cfg: &mut T,
        print_version: P,
        out: &mut dyn Write,
    ) -> Result<LoadResult, ConfigError>
    where
        T: Serialize + DeserializeOwned,
        P: Fn(&mut dyn Write) -> std::io::Result<()>,
    {
        self.load_from(std::env::args_os(), cfg, print_version, out)
    }

    /// Same as [`Loader::load`], parsing `args` instead of the process
    /// arguments. The first item is the program name.
    pub fn load_from<I, A, T, P>(
        &self,
        args: I,
        cfg: &mut T,
        print_version: P,
        out: &mut dyn Write,
    ) -> Result<LoadResult, ConfigError>
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString> + Clone,
        T: Serialize + DeserializeOwned,
        P: Fn(&mut dyn Write) -> std::io::Result<()>,
    {
        let defaults = destination_defaults(cfg)?;

        let mut cmd = build_root_command(self);
        let matches = cmd
            .try_get_matches_from_mut(args)
            .map_err(|e| ConfigError::ArgumentParse(Box::new(e)))?;
        let flags = root_flags(&matches)?;

        // Version wins over everything, including a bad --config.
        if flags.version {
            tracing::debug!(loader = %self.name, "version requested");
            print_version(out).map_err(ConfigError::VersionWrite)?;
            return Ok(LoadResult::Stop);
        }

        if flags.help {
            tracing::debug!(loader = %self.name, "help requested");
            let help = cmd.render_long_help();
            write!(out, "{help}").map_err(ConfigError::Output)?;
            return Ok(LoadResult::Stop);
        }

        let path = self.resolve_config_path(flags.config);
        let format = self.format_for(&path)?;
        tracing::debug!(path = %path.display(), %format, "resolved config path");

        let content = std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::InvalidData => ConfigError::ConfigParse {
                path: path.clone(),
                source: Box::new(figment::Error::from(source.to_string())),
            },
            _ => ConfigError::ConfigNotFound { path: path.clone(), source },
        })?;
        let file = format.parse(&content).map_err(|source| ConfigError::ConfigParse {
            path: path.clone(),
            source: Box::new(source),
        })?;

        let overrides = env::overrides(&self.env_prefix, &[&file, &defaults]);
        let env_count = overrides.len();

        let mut figment =
            Figment::from(Serialized::defaults(defaults)).merge(Serialized::defaults(file));
        for (key, value) in overrides {
            figment = figment.merge(Serialized::default(&key, value));
        }

        let merged: T = figment.extract().map_err(|source| ConfigError::ConfigUnmarshal {
            path: path.clone(),
            source: Box::new(source),
        })?;
        *cfg = merged;

        tracing::debug!(path = %path.display(), env_overrides = env_count, "config loaded");
        Ok(LoadResult::Continue)
    }

    /// `--config` > `<PREFIX>_CONFIG` > the loader's default path.
    fn resolve_config_path(&self, flag: Option<String>) -> PathBuf {
        if let Some(path) = flag {
            return PathBuf::from(path);
        }
        if let Some(path) = env::env_var_or_none(&env::env_key(&self.env_prefix, CONFIG_FLAG)) {
            return PathBuf::from(path);
        }
        self.config_path.clone()
    }

    fn format_for(&self, path: &std::path::Path) -> Result<Format, ConfigError> {
        self.format
            .or_else(|| Format::from_path(path))
            .ok_or_else(|| ConfigError::UnsupportedFormat { path: path.to_path_buf() })
    }
}

/// Serialize the destination's current values as the lowest merge layer.
///
/// Anything that does not serialize to a table cannot receive named keys and
/// is rejected up front.
fn destination_defaults<T: Serialize>(cfg: &T) -> Result<Dict, ConfigError> {
    match Value::serialize(cfg) {
        Ok(Value::Dict(_, dict)) => Ok(dict),
        Ok(other) => Err(ConfigError::InvalidArgument(format!(
            "cfg must be a struct or map - got {}",
            describe(&other)
        ))),
        Err(e) => Err(ConfigError::InvalidArgument(format!("cfg cannot be serialized: {e}"))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::String(..) => "string",
        Value::Char(..) => "char",
        Value::Bool(..) => "bool",
        Value::Num(..) => "number",
        Value::Empty(..) => "empty value",
        Value::Dict(..) => "table",
        Value::Array(..) => "sequence",
    }
}
