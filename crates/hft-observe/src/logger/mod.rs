mod config;
mod error;
mod install;
pub(crate) mod object;

pub use config::{LOG_ENV_VAR, LoggerConfig};
pub use error::{LoggerError, LoggerResult};
pub use object::LoggerFormat;
pub use object::LoggerLevel;
pub use object::{LoggerTimeZone, init_local_offset};

/// Installs the global tracing subscriber described by `cfg`.
///
/// Afterwards every `tracing` macro in the agent (store, scheduler,
/// orchestrator, command surface) goes through this subscriber.
///
/// # Local timezone
/// Call [`init_local_offset`] in `main()` before the tokio runtime is built.
/// The same cached offset is used for the clock label.
///
/// # Examples
/// ```rust
/// use hft_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("failed to initialize logger");
///
/// tracing::info!("logger initialized");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LoggerFormat::Text => install::install_text(cfg),
        LoggerFormat::Json => install::install_json(cfg),
        LoggerFormat::Journald => install::install_journald(cfg),
    }
}
