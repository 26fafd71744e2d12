use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No `source=` entry in {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Working directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),
}
