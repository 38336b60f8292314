use crate::config::Config;
use crate::error::AppError;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Installs the file logger. The terminal belongs to the UI, so nothing is
/// installed when no log file was requested.
pub fn init(config: &Config) -> Result<(), AppError> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::LogPath(path.display().to_string()))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;

    tracing_subscriber::fmt()
        .with_writer(appender)
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
