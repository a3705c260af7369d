use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that can occur while preparing the build directory or running the
/// delegated toolchain.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to create build directory {path}: {source}")]
    DirectoryCreation { path: PathBuf, source: io::Error },

    #[error("cannot access directory {path}: {source}")]
    DirectoryAccess { path: PathBuf, source: io::Error },

    #[error("{tool} not found in PATH")]
    ToolNotFound { tool: String },

    #[error("configure step failed with {status}")]
    ConfigureFailed { status: ExitStatus },

    #[error("compile step failed with {status}")]
    CompileFailed { status: ExitStatus },

    #[error("failed to read preset file {path}: {source}")]
    PresetFile { path: PathBuf, source: io::Error },

    #[error("invalid preset file: {0}")]
    PresetParse(#[from] serde_json::Error),

    #[error("preset {name} not found")]
    PresetNotFound { name: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for launcher operations.
pub type Result<T> = std::result::Result<T, LaunchError>;
