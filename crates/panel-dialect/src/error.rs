use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialectError {
    #[error("invalid dialect JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid dialect TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to read dialect file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported dialect file extension: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("dialect store failed for organization {org_id}: {message}")]
    Store { org_id: String, message: String },
}

pub type Result<T> = std::result::Result<T, DialectError>;
