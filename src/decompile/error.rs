use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecompileError {
    #[error("APK not found: {}", path.display())]
    ApkNotFound { path: PathBuf },

    #[error("apktool jar not found: {}", path.display())]
    ApktoolNotFound { path: PathBuf },

    #[error("Java runtime not found: {reason}")]
    JavaNotFound { reason: String },

    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("apktool exited with status {code:?}")]
    ToolFailed { code: Option<i32> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DecompileError>;
