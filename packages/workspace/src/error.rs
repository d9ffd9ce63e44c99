/// Errors that can occur when using the workspace stores.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceStoreError {
    /// Failed to create storage directory.
    #[error("Failed to create storage directory: {0}")]
    CreateDir(std::io::Error),

    /// Failed to read from storage.
    #[error("Failed to read from storage: {0}")]
    Read(std::io::Error),

    /// Failed to write to storage.
    #[error("Failed to write to storage: {0}")]
    Write(std::io::Error),

    /// Failed to parse stored data.
    #[error("Failed to parse stored data: {0}")]
    Parse(serde_json::Error),

    /// Failed to serialize data.
    #[error("Failed to serialize data: {0}")]
    Serialize(serde_json::Error),

    /// Could not determine data directory.
    #[error("Could not determine XDG data directory")]
    NoDataDir,

    /// Could not determine config directory.
    #[error("Could not determine XDG config directory")]
    NoConfigDir,
}
