//! configkit: bootstrap service configuration at startup
//!
//! Merges a config file, environment variables and command-line flags into a
//! typed struct (flag > env > file > default), with built-in `--config`,
//! `--version` and `--help` handling.
//!
//! ```no_run
//! use configkit::{plain_version_printer, LoadResult, Loader};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Config {
//!     port: u16,
//!     log_level: String,
//! }
//!
//! let loader = Loader::new("myapp", "My service", "", "config.yaml", "MYAPP");
//! let mut cfg = Config::default();
//! let result = loader.load(&mut cfg, plain_version_printer("v0.1.0"), &mut std::io::stdout())?;
//! if result == LoadResult::Stop {
//!     return Ok(());
//! }
//! # Ok::<(), configkit::ConfigError>(())
//! ```

pub mod error;
pub mod format;
pub mod loader;
pub mod service;
pub mod version;

pub use error::ConfigError;
pub use format::Format;
pub use loader::{LoadResult, Loader};
pub use service::ServiceConfig;
pub use version::{json_version_printer, plain_version_printer};
