use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid log file path: {0}")]
    LogPath(String),

    #[error("could not open log file: {0}")]
    LogFile(#[from] tracing_appender::rolling::InitError),

    #[error("could not install logger: {0}")]
    Logging(String),
}
