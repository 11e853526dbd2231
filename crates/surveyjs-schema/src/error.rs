use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading survey definitions or compile options.
///
/// Compilation itself never fails; see [`crate::compile`].
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid survey definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid compile options: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;
