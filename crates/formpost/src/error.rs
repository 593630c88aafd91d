//! Error types for form encoding.

/// Result type alias for form encoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Form encoding error types.
///
/// Encoding a body never fails; these errors only come from validating
/// caller-supplied boundaries, content types and configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Boundary that does not satisfy RFC 2046.
    #[error("Invalid boundary: {0}")]
    InvalidBoundary(String),

    /// Invalid content type.
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    /// Boundary entropy outside the supported range.
    #[error("Invalid boundary entropy: {0} bytes (expected 33..=48)")]
    InvalidEntropy(usize),
}
