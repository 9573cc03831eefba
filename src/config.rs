//! Config module.
//! Manages I/O for chessview.json (server endpoint, request timeout).
//! Uses serde for JSON serialization.
//! Falls back to defaults when the file is missing.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::server::DEFAULT_TIMEOUT_SECS;

pub const DEFAULT_CONFIG_PATH: &str = "chessview.json";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid config JSON in {}", path.display()))
}

pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, json).with_context(|| format!("Failed to write config: {}", path.display()))
}
