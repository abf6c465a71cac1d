use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle, default_format};
use std::env;

pub const LOG_ENV_VAR: &str = "PGN_SPLIT_LOG";
const DEFAULT_SPEC: &str = "warn";

/// Log specification from `PGN_SPLIT_LOG`, falling back to `warn`.
fn log_spec() -> String {
    env::var(LOG_ENV_VAR)
        .ok()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SPEC.to_string())
}

/// Starts the stderr logger. The returned handle must stay alive for the
/// whole run.
pub fn setup_logging() -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(log_spec())?
        .log_to_stderr()
        .format(default_format)
        .start()
}
