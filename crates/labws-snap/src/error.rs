use thiserror::Error;

/// Errors from snapshot encoding and decoding.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid magic: expected {expected}, got {actual}")]
    InvalidMagic { expected: String, actual: String },

    #[error("unsupported snapshot version: major {major}")]
    UnsupportedVersion { major: u16 },

    #[error("corrupt snapshot: {reason}")]
    Corrupt { reason: String },

    #[error("snapshot checksum mismatch")]
    ChecksumMismatch,

    #[error("entry CRC mismatch for '{name}'")]
    CrcMismatch { name: String },

    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("compression failed: {0}")]
    Compression(String),

    #[error("decompression failed: {0}")]
    Decompression(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
