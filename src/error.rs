//! Error types for attic.

use thiserror::Error;

/// Common error type for attic.
#[derive(Error, Debug)]
pub enum AtticError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Validation error for caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Payload decoding error (e.g. malformed base64).
    #[error("decode error: {0}")]
    Decode(String),

    /// HTTP fetch error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for attic operations.
pub type Result<T> = std::result::Result<T, AtticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_display() {
        let err = AtticError::NotFound("file: logo.png".to_string());
        assert_eq!(err.to_string(), "file: logo.png not found");
    }

    #[test]
    fn test_validation_error_display() {
        let err = AtticError::Validation("unsupported image payload".to_string());
        assert_eq!(
            err.to_string(),
            "validation error: unsupported image payload"
        );
    }

    #[test]
    fn test_decode_error_display() {
        let err = AtticError::Decode("invalid base64".to_string());
        assert_eq!(err.to_string(), "decode error: invalid base64");
    }

    #[test]
    fn test_http_error_display() {
        let err = AtticError::Http("status 404".to_string());
        assert_eq!(err.to_string(), "HTTP error: status 404");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AtticError = io_err.into();
        assert!(matches!(err, AtticError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(AtticError::Validation("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
