use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("VPK tool not found: {}", path.display())]
    ToolNotFound { path: PathBuf },

    #[error("Decompiled APK directory not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Nothing to package: {} has neither assets/ nor res/", path.display())]
    NothingToPackage { path: PathBuf },

    #[error("Invalid param.sfo field {field}: {reason}")]
    InvalidMetadata { field: String, reason: String },

    #[error("Failed to spawn VPK tool {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("VPK tool failed with exit code {code:?}: {stderr}")]
    ToolFailed { code: Option<i32>, stderr: String },

    #[error("VPK tool reported success but {} was not created", path.display())]
    OutputMissing { path: PathBuf },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PackageError>;
