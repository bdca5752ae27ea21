// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{} is not a valid file", .0.display())]
    NotAFile(PathBuf),

    #[error("walking input directory failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("no such NPC at {url}")]
    NotFound { url: String },

    #[error("couldn't find an element h1.heading-size-1 at {url}")]
    MissingHeading { url: String },

    #[error("id {id:?} for {variable} is not a valid NPC id")]
    InvalidId { variable: String, id: String },

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("worker thread panicked: {0}")]
    WorkerPanicked(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl Error {
    /// True for the "page exists but has nothing for us" family of failures.
    pub fn is_no_result(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
