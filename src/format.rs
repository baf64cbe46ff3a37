//! Config file formats

use figment::providers::{self, Format as _};
use figment::value::Dict;
use figment::{Profile, Provider};
use std::fmt;
use std::path::Path;

/// Structured text formats a config file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Pick a format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    /// Decode `content` into a key/value tree.
    ///
    /// Blank content decodes to an empty tree so an empty file behaves like a
    /// file with no keys.
    pub fn parse(self, content: &str) -> Result<Dict, figment::Error> {
        if content.trim().is_empty() {
            return Ok(Dict::new());
        }

        let mut data = match self {
            Format::Yaml => providers::Yaml::string(content).data()?,
            Format::Json => providers::Json::string(content).data()?,
            Format::Toml => providers::Toml::string(content).data()?,
        };
        Ok(data.remove(&Profile::Default).unwrap_or_default())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Toml => "toml",
        };
        f.write_str(name)
    }
}
