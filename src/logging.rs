//! File logging setup.
//!
//! Stdout belongs to the interactive menu, so log records only ever go to a
//! file. A failure to start the logger is reported by the caller and the
//! program runs on without logs.

use crate::config::{AppConfig, LOG_FILE_BASENAME};
use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};
use log::info;

/// Starts the file logger. Keep the returned handle alive for the whole run;
/// dropping it flushes and stops logging.
pub fn init_logging(config: &AppConfig) -> Result<LoggerHandle, String> {
    let level = normalize_level(config.log_level)?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME)
                .suppress_timestamp(),
        )
        .append()
        .write_mode(WriteMode::BufferAndFlush)
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    info!(
        "event=app_start version={} level={} data_file={}",
        env!("CARGO_PKG_VERSION"),
        level,
        config.data_file.display()
    );
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}
