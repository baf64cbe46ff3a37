//! Root command construction.
//!
//! A fresh [`Command`] is built for every load so no flag state is shared
//! between calls.

use clap::{Arg, ArgAction, ArgMatches, Command};

use super::Loader;
use crate::error::ConfigError;

pub(crate) const CONFIG_FLAG: &str = "config";
pub(crate) const VERSION_FLAG: &str = "version";
pub(crate) const HELP_FLAG: &str = "help";
const TRAILING_ARGS: &str = "args";

/// Flags the loader cares about after parsing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RootFlags {
    pub(crate) config: Option<String>,
    pub(crate) version: bool,
    pub(crate) help: bool,
}

/// Build the root command for `loader`.
///
/// Help is declared as a plain switch instead of clap's built-in action so
/// that `--version` can still win when both are given. Positional arguments
/// are accepted and left to the application; unknown flags are errors.
pub(crate) fn build_root_command(loader: &Loader) -> Command {
    let mut cmd = Command::new(loader.name.clone())
        .about(loader.short.clone())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new(CONFIG_FLAG)
                .short('c')
                .long(CONFIG_FLAG)
                .value_name("PATH")
                .help("Path to configuration file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new(VERSION_FLAG)
                .short('v')
                .long(VERSION_FLAG)
                .help("Show version info")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(HELP_FLAG)
                .short('h')
                .long(HELP_FLAG)
                .help("Print help")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new(TRAILING_ARGS).action(ArgAction::Append).hide(true));

    if !loader.long.is_empty() {
        cmd = cmd.long_about(loader.long.clone());
    }
    cmd
}

/// Read the declared flags back out of `matches`.
pub(crate) fn root_flags(matches: &ArgMatches) -> Result<RootFlags, ConfigError> {
    let config = matches
        .try_get_one::<String>(CONFIG_FLAG)
        .map_err(|source| ConfigError::FlagBinding { flag: CONFIG_FLAG, source })?
        .filter(|path| !path.trim().is_empty())
        .cloned();
    let version = matches
        .try_get_one::<bool>(VERSION_FLAG)
        .map_err(|source| ConfigError::FlagBinding { flag: VERSION_FLAG, source })?
        .copied()
        .unwrap_or(false);
    let help = matches
        .try_get_one::<bool>(HELP_FLAG)
        .map_err(|source| ConfigError::FlagBinding { flag: HELP_FLAG, source })?
        .copied()
        .unwrap_or(false);

    Ok(RootFlags { config, version, help })
}
