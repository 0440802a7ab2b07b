use crate::db::persistence::DATA_FILE;
use std::path::PathBuf;

pub const LOG_FILE_BASENAME: &str = "exptrack";

/// Effective settings for one run. There are no flags or environment
/// overrides; everything lives next to the working directory.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DATA_FILE),
            log_dir: PathBuf::from("."),
            log_level: default_log_level(),
        }
    }
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) { "debug" } else { "info" }
}
