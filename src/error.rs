// src/error.rs
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Unreadable/unwritable file. Fatal to the step that hit it.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configured per-source file does not exist. The merger downgrades
    /// this to a skip diagnostic.
    #[error("Source file not found: {}", .0.display())]
    MissingSourceFile(PathBuf),

    /// Sentiment range with lo > hi, rejected at construction.
    #[error("Malformed sentiment range: lo {lo} > hi {hi}")]
    MalformedFilterRange { lo: f64, hi: f64 },

    #[error("Config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io { path: path.as_ref().to_path_buf(), source }
    }

    pub fn config(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Error::Config { path: path.as_ref().to_path_buf(), message: message.into() }
    }
}
