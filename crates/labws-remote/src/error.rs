use labws_protocol::ProtocolError;
use thiserror::Error;

/// Errors from remote transport operations.
///
/// Connection-class errors (`is_connection_error`) mean the channel itself
/// failed and trigger the workspace's automatic fallback; domain errors are
/// forwarded verbatim to the caller.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote host could not be reached.
    #[error("remote host unreachable: {0}")]
    Unreachable(String),

    /// The bounded request timeout elapsed.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The remote host rejected the credential.
    #[error("authentication rejected by remote host")]
    AuthRejected,

    /// The named object does not exist on the remote host.
    #[error("object '{name}' not found on remote. Available objects: [{}]", .available.join(", "))]
    NotFound { name: String, available: Vec<String> },

    /// The name is already bound on the remote host.
    #[error("object '{0}' already exists on remote")]
    Duplicate(String),

    /// Any other error reported by the remote host.
    #[error("remote error {code}: {message}")]
    Remote { code: u32, message: String },

    /// Encoding/decoding failure on the wire.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl RemoteError {
    /// Whether this failure is connection-class (channel broken) rather
    /// than a domain error from a healthy remote.
    ///
    /// A garbled payload counts as connection-class: once the channel
    /// produces undecodable bytes it cannot be trusted for further calls.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Unreachable(_) | Self::Timeout { .. } | Self::AuthRejected | Self::Protocol(_)
        )
    }
}

/// Result alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_classification() {
        assert!(RemoteError::Unreachable("refused".into()).is_connection_error());
        assert!(RemoteError::Timeout { timeout_ms: 500 }.is_connection_error());
        assert!(RemoteError::AuthRejected.is_connection_error());
        assert!(!RemoteError::NotFound { name: "x".into(), available: vec![] }
            .is_connection_error());
        assert!(!RemoteError::Duplicate("x".into()).is_connection_error());
        assert!(!RemoteError::Remote { code: 500, message: "boom".into() }
            .is_connection_error());
    }

    #[test]
    fn not_found_lists_available() {
        let err = RemoteError::NotFound {
            name: "gone".into(),
            available: vec!["a".into(), "b".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'gone'"));
        assert!(msg.contains("[a, b]"));
    }
}
