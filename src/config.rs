//! Optional TOML defaults, so repeated bench runs don't need the full flag set.

use std::path::Path;

use anyhow::Context;

#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub port: Option<String>,
    pub baud: Option<u32>,
    pub timeout_ms: Option<u64>,
    pub read_limit: Option<usize>,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Could not parse config file {}", path.display()))
    }
}
