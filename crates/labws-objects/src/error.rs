use thiserror::Error;

/// Errors from entity construction and validation.
#[derive(Debug, Error)]
pub enum ObjectError {
    /// Paired arrays have different lengths.
    #[error("length mismatch: {array} has {actual} elements, expected {expected}")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Image dimensions do not match the data buffer.
    #[error("shape mismatch: {rows}x{cols} grid requires {expected} elements, data has {actual}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    /// A name or title that must be non-empty is empty.
    #[error("empty {0}")]
    Empty(&'static str),
}

/// Result alias for entity operations.
pub type ObjectResult<T> = Result<T, ObjectError>;
