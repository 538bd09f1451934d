use std::path::PathBuf;
use thiserror::Error;

/// Failures of the style configuration layer.
///
/// Tree construction and rendering are total over live indices and have no
/// error conditions of their own.
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("failed to read style file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid style file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid style override: {message}")]
    Env { message: String },

    #[error("failed to serialize style: {message}")]
    Serialize { message: String },
}

pub type StyleResult<T> = Result<T, StyleError>;
