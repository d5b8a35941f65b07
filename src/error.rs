use std::path::PathBuf;
use thiserror::Error;

/// Failures while fetching or parsing the review feed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("feed request failed with HTTP status {0}")]
    HttpStatus(u16),

    #[error("feed data is malformed: {0}")]
    MalformedData(String),

    #[error("feed transport error: {0}")]
    Transport(String),

    #[error("invalid feed location: {0}")]
    InvalidLocation(String),
}

/// Failures while attaching the carousel to its mount points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("mount point '{0}' does not exist")]
    MissingSurface(String),

    #[error("indicators and slides cannot share mount point '{0}'")]
    SharedSurface(String),

    #[error("navigation activation failed: {0}")]
    Navigation(String),
}

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
