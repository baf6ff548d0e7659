use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Failed to walk {path}: {source}")]
    Walk { path: PathBuf, source: walkdir::Error },
    #[error("YAML parse error in {path}: {source}")]
    Decode { path: PathBuf, source: serde_yaml::Error },
}

#[derive(Debug, Error)]
pub enum KapigraphError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("target not found: {0}")]
    TargetNotFound(String),

    #[error("Invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Visualization error: {0}")]
    Visualization(String),
}
