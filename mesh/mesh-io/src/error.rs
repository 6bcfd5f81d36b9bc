//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
///
/// Every load error aborts the load; no partial mesh is returned.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// Invalid header in binary STL.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual header size.
        got: usize,
    },

    /// Binary STL ended before the declared number of triangles.
    #[error("invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount {
        /// Number of triangles declared in the header.
        expected: u32,
        /// Number of complete triangles read.
        got: u32,
    },

    /// A face refers to a vertex that does not exist.
    #[error("vertex index {index} out of range for {count} vertices")]
    IndexOutOfRange {
        /// Index as written in the file.
        index: i64,
        /// Number of vertices available.
        count: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Integer parsing error.
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = IoError::IndexOutOfRange { index: 7, count: 3 };
        assert_eq!(err.to_string(), "vertex index 7 out of range for 3 vertices");

        let err = IoError::invalid_content("bad token");
        assert_eq!(err.to_string(), "invalid file content: bad token");

        let err = IoError::UnknownFormat {
            extension: "xyz".to_string(),
        };
        assert_eq!(err.to_string(), "unknown file format: .xyz");
    }

    #[test]
    fn parse_errors_convert() {
        let err: IoError = "abc".parse::<f64>().unwrap_err().into();
        assert!(matches!(err, IoError::ParseFloat(_)));
    }
}
