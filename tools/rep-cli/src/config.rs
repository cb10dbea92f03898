//! CLI configuration (rep.toml)
//!
//! Parse options and output settings. The default file lives in the
//! platform config directory; a missing or unreadable default file falls
//! back to defaults, while a file named with `--config` must parse.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rep_parser::ParseOptions;
use serde::{Deserialize, Serialize};

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "rep.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Which replay sections to decode
    #[serde(default)]
    pub parse: ParseOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Indent JSON output (default: false)
    #[serde(default)]
    pub pretty_json: bool,
    /// List actions of unknown kind (default: true)
    #[serde(default = "default_true")]
    pub show_unknown: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: false,
            show_unknown: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Platform config directory
///
/// On Linux: `~/.config/rep`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "rep").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Load the config from `explicit`, or from the default location
pub fn load(explicit: Option<&Path>) -> Result<CliConfig> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        return parse(&content).with_context(|| format!("Invalid config {}", path.display()));
    }

    let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE)) else {
        return Ok(CliConfig::default());
    };
    let config = std::fs::read_to_string(&path)
        .ok()
        .and_then(|content| match parse(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        })
        .unwrap_or_default();
    Ok(config)
}

fn parse(content: &str) -> Result<CliConfig> {
    Ok(toml::from_str(content)?)
}
