//! Error types for the samplekit project modeling library.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-tree errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Config root must be a mapping")]
    NotAMapping,

    #[error("Missing required config section: {0}")]
    MissingSection(&'static str),

    #[error("Missing required config key: {0}")]
    MissingKey(&'static str),

    #[error("Subproject block '{0}' must be a mapping")]
    InvalidSubproject(String),

    #[error("Unknown subproject: {0}")]
    UnknownSubproject(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Annotation-sheet errors
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Annotation source unreadable: {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed annotation table: {0}")]
    Malformed(#[from] csv::Error),

    #[error("Duplicate column header: {0}")]
    DuplicateColumn(String),

    #[error("Row {row} is missing a sample name")]
    MissingSampleName { row: usize },
}

/// Project-level errors
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Annotation sheet error: {0}")]
    Sheet(#[from] SheetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
