//! Error types for configuration loading.
//!
//! Every failure carries the context needed to act on it: the resolved
//! config path for file errors, the offending key for sub-config lookups.
//! Nothing here is retried; the caller decides whether to exit.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`crate::Loader::load`] and friends.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The call site handed the loader something it cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("parse command line arguments")]
    ArgumentParse(#[source] Box<clap::Error>),

    /// A declared flag could not be read back from the parsed matches.
    #[error("bind {flag} flag")]
    FlagBinding {
        flag: &'static str,
        #[source]
        source: clap::parser::MatchesError,
    },

    #[error("print version")]
    VersionWrite(#[source] io::Error),

    #[error("write help output")]
    Output(#[source] io::Error),

    #[error("config file not found at {path:?}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported config format for {path:?} (expected .yaml, .yml, .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("read main config at {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("unmarshal main config from {path:?}")]
    ConfigUnmarshal {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("sub-config '{0}' not found")]
    SubConfigNotFound(String),

    #[error("sub-config '{0}' is not a table")]
    SubConfigNotATable(String),
}

impl ConfigError {
    /// Whether this error comes from call-site misuse rather than runtime input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ConfigError::InvalidArgument(_))
    }
}
