use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

use crate::logger::{
    error::LoggerResult,
    object::{LoggerFormat, LoggerLevel, LoggerTimeZone},
};

/// Environment variable that overrides [`LoggerConfig::level`] when set.
pub const LOG_ENV_VAR: &str = "HFT_LOG";

/// Logger configuration, usually the `logger` section of the agent config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Filter expression (e.g. "info", "hft_core=debug,info").
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
    /// Include module targets in output.
    pub with_targets: bool,
    /// Colored output (text format, terminals only).
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Color is used only when enabled in config and stdout is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }

    /// Replace the level with the value of [`LOG_ENV_VAR`], if present.
    ///
    /// Returns `Ok(true)` when an override was applied. An invalid expression
    /// is an error and leaves the config unchanged.
    pub fn apply_env_override(&mut self) -> LoggerResult<bool> {
        match std::env::var(LOG_ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => {
                self.level = raw.parse()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
