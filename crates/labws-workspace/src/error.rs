use labws_objects::ObjectError;
use labws_remote::RemoteError;
use labws_snap::SnapshotError;
use thiserror::Error;

/// Errors surfaced by workspace operations, regardless of backend.
///
/// `Connection` is reserved for channel failures (unreachable, timed out,
/// credential rejected, undecodable wire payload); it is the only variant
/// that triggers the automatic live-to-standalone fallback. Errors a healthy
/// remote reports about itself arrive as `Remote`.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The named object does not exist in the workspace.
    #[error("object '{name}' not found. Available objects: [{}]", .available.join(", "))]
    NotFound { name: String, available: Vec<String> },

    /// The name is already bound and overwrite was not requested.
    #[error("object '{0}' already exists (pass overwrite to replace it)")]
    Duplicate(String),

    /// The object failed a construction-time shape invariant.
    #[error("invalid object: {0}")]
    InvalidObject(#[from] ObjectError),

    /// The live host is unreachable, timed out, or rejected the credential.
    #[error("connection error: {0}")]
    Connection(String),

    /// Snapshot encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] SnapshotError),

    /// A healthy live host reported an internal failure.
    #[error("remote error {code}: {message}")]
    Remote { code: u32, message: String },

    /// The operation exists only in live mode.
    #[error("'{operation}' requires live mode; the workspace is standalone")]
    ModeUnavailable { operation: &'static str },
}

impl From<RemoteError> for WorkspaceError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound { name, available } => Self::NotFound { name, available },
            RemoteError::Duplicate(name) => Self::Duplicate(name),
            RemoteError::Remote { code, message } => Self::Remote { code, message },
            // Connection-class by RemoteError::is_connection_error.
            other => Self::Connection(other.to_string()),
        }
    }
}

/// Result alias for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
