use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use hft_observe::LoggerConfig;

pub const DEFAULT_DATA_FILE: &str = "plugins/HFloatingText/data/floating_texts.json";

/// Agent configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Backing file of the label store.
    pub data_file: PathBuf,
    pub logger: LoggerConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            logger: LoggerConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Read the config from `path`, or use the defaults when no path is given.
    ///
    /// The log level may still be overridden from the environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut cfg = match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("cannot read config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("cannot parse config {}", path.display()))?
            }
            None => Self::default(),
        };
        cfg.logger.apply_env_override()?;
        Ok(cfg)
    }
}
