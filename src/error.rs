use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Could not read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config file {path} is not valid JSON")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Could not open log file {path}")]
    LogSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Display initialization failed: {0}")]
    DisplayInit(String),
    #[error("Frame failed: {0}")]
    Frame(String),
}
