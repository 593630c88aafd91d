//! Encoder configuration types.

use crate::boundary::{DEFAULT_ENTROPY, MAX_ENTROPY};
use crate::content_type::{ContentType, OCTET_STREAM};
use crate::error::{Error, Result};

/// Form encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Random bytes used to generate each boundary.
    pub entropy_bytes: usize,
    /// Prefix generated boundaries with five dashes.
    pub legacy_prefix: bool,
    /// Content type for files whose type cannot be guessed.
    pub fallback_content_type: String,
}

impl Config {
    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entropy_bytes: DEFAULT_ENTROPY,
            legacy_prefix: true,
            fallback_content_type: OCTET_STREAM.to_string(),
        }
    }
}

/// Builder for encoder configuration.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    entropy_bytes: usize,
    legacy_prefix: bool,
    fallback_content_type: String,
}

impl ConfigBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        let defaults = Config::default();
        Self {
            entropy_bytes: defaults.entropy_bytes,
            legacy_prefix: defaults.legacy_prefix,
            fallback_content_type: defaults.fallback_content_type,
        }
    }

    /// Sets the number of random bytes per boundary.
    #[must_use]
    pub const fn entropy_bytes(mut self, entropy_bytes: usize) -> Self {
        self.entropy_bytes = entropy_bytes;
        self
    }

    /// Enables or disables the legacy five-dash boundary prefix.
    #[must_use]
    pub const fn legacy_prefix(mut self, enabled: bool) -> Self {
        self.legacy_prefix = enabled;
        self
    }

    /// Sets the content type used when guessing from a filename fails.
    #[must_use]
    pub fn fallback_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.fallback_content_type = content_type.into();
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntropy`] if the entropy is below the default
    /// of 33 bytes or would produce a boundary longer than 70 characters, and
    /// [`Error::InvalidContentType`] if the fallback type cannot be parsed.
    pub fn build(self) -> Result<Config> {
        if !(DEFAULT_ENTROPY..=MAX_ENTROPY).contains(&self.entropy_bytes) {
            tracing::debug!(entropy = self.entropy_bytes, "Rejecting boundary entropy");
            return Err(Error::InvalidEntropy(self.entropy_bytes));
        }

        if let Err(e) = ContentType::parse(&self.fallback_content_type) {
            tracing::debug!(?e, "Rejecting fallback content type");
            return Err(e);
        }

        Ok(Config {
            entropy_bytes: self.entropy_bytes,
            legacy_prefix: self.legacy_prefix,
            fallback_content_type: self.fallback_content_type,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.entropy_bytes, 33);
        assert!(config.legacy_prefix);
        assert_eq!(config.fallback_content_type, "application/octet-stream");
    }

    #[test]
    fn test_builder_defaults_match() {
        assert_eq!(Config::builder().build().unwrap(), Config::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .entropy_bytes(48)
            .legacy_prefix(false)
            .fallback_content_type("binary/unknown")
            .build()
            .unwrap();
        assert_eq!(config.entropy_bytes, 48);
        assert!(!config.legacy_prefix);
        assert_eq!(config.fallback_content_type, "binary/unknown");
    }

    #[test]
    fn test_builder_rejects_entropy() {
        let err = Config::builder().entropy_bytes(16).build().unwrap_err();
        assert!(matches!(err, Error::InvalidEntropy(16)));
        assert!(Config::builder().entropy_bytes(49).build().is_err());
    }

    #[test]
    fn test_builder_rejects_fallback() {
        let err = Config::builder()
            .fallback_content_type("not a type")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidContentType(_)));
    }
}
