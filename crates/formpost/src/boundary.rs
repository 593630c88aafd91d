//! Multipart boundary tokens.
//!
//! Boundaries separate the sections of a multipart body (RFC 2046 §5.1.1).
//! Generated boundaries come from the operating system's CSPRNG so they
//! cannot be predicted or collide with field content.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{Error, Result};

/// Dashes prepended to generated boundaries for legacy ASP servers.
pub const LEGACY_PREFIX: &str = "-----";

/// Maximum boundary length allowed by RFC 2046.
pub const MAX_LEN: usize = 70;

/// Default number of random bytes in a generated boundary.
pub const DEFAULT_ENTROPY: usize = 33;

/// Largest entropy whose encoded boundary still fits in [`MAX_LEN`].
pub const MAX_ENTROPY: usize = 48;

/// A validated multipart boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundary(String);

impl Boundary {
    /// Creates a boundary from a caller-supplied token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoundary`] if the token is empty, longer than
    /// 70 characters, contains characters outside the RFC 2046 `bchars` set,
    /// or ends with a space.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();

        if token.is_empty() {
            return Err(Error::InvalidBoundary("empty boundary".to_string()));
        }
        if token.len() > MAX_LEN {
            return Err(Error::InvalidBoundary(format!(
                "{} characters exceeds limit of {MAX_LEN}",
                token.len()
            )));
        }
        if let Some(c) = token.chars().find(|&c| !is_bchar(c)) {
            return Err(Error::InvalidBoundary(format!("illegal character {c:?}")));
        }
        if token.ends_with(' ') {
            return Err(Error::InvalidBoundary("trailing space".to_string()));
        }

        Ok(Self(token))
    }

    /// Generates a random boundary from `entropy` bytes of OS randomness.
    ///
    /// The bytes are URL-safe base64 encoded and, when `legacy_prefix` is
    /// set, prefixed with [`LEGACY_PREFIX`].
    #[must_use]
    pub fn generate(entropy: usize, legacy_prefix: bool) -> Self {
        let mut random_bytes = vec![0u8; entropy];
        OsRng.fill_bytes(&mut random_bytes);

        let encoded = URL_SAFE_NO_PAD.encode(&random_bytes);
        if legacy_prefix {
            Self(format!("{LEGACY_PREFIX}{encoded}"))
        } else {
            Self(encoded)
        }
    }

    /// Returns the boundary token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the delimiter line that opens each section (`--<boundary>`).
    #[must_use]
    pub fn delimiter(&self) -> String {
        format!("--{}", self.0)
    }

    /// Returns the delimiter line that closes the body (`--<boundary>--`).
    #[must_use]
    pub fn close_delimiter(&self) -> String {
        format!("--{}--", self.0)
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::generate(DEFAULT_ENTROPY, true)
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Boundary {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// RFC 2046 `bchars`: digits, letters and `'()+_,-./:=?` plus space.
const fn is_bchar(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '\'' | '(' | ')' | '+' | '_' | ',' | '-' | '.' | '/' | ':' | '=' | '?' | ' '
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::needless_collect)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_boundary_shape() {
        let boundary = Boundary::default();
        let token = boundary.as_str();
        assert!(token.starts_with("-----"));
        // 33 bytes encode to exactly 44 base64 characters
        assert_eq!(token.len(), 5 + 44);
        assert!(
            token[5..]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_generate_without_prefix() {
        let boundary = Boundary::generate(DEFAULT_ENTROPY, false);
        assert_eq!(boundary.as_str().len(), 44);
    }

    #[test]
    fn test_max_entropy_fits_limit() {
        let boundary = Boundary::generate(MAX_ENTROPY, true);
        assert!(boundary.as_str().len() <= MAX_LEN);
        assert!(Boundary::new(boundary.as_str()).is_ok());
    }

    #[test]
    fn test_generated_boundaries_unique() {
        let seen: HashSet<_> = (0..64).map(|_| Boundary::default()).collect();
        assert_eq!(seen.len(), 64);
    }

    #[test]
    fn test_delimiters() {
        let boundary = Boundary::new("xyz").unwrap();
        assert_eq!(boundary.delimiter(), "--xyz");
        assert_eq!(boundary.close_delimiter(), "--xyz--");
        assert_eq!(boundary.to_string(), "xyz");
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(matches!(Boundary::new(""), Err(Error::InvalidBoundary(_))));
        assert!(Boundary::new("a".repeat(71)).is_err());
        assert!(Boundary::new("semi;colon").is_err());
        assert!(Boundary::new("quote\"d").is_err());
        assert!(Boundary::new("line\r\nbreak").is_err());
        assert!(Boundary::new("trailing ").is_err());
        assert!(Boundary::new("bôundary").is_err());
    }

    #[test]
    fn test_new_accepts_rfc_chars() {
        assert!(Boundary::new("a".repeat(70)).is_ok());
        assert!(Boundary::new("simple boundary").is_ok());
        assert!(Boundary::new("'()+_,-./:=?").is_ok());
    }
}
