//! Form fields.
//!
//! A field is either a plain value or a file upload. Names and filenames are
//! percent-encoded on construction because they are written verbatim into
//! `Content-Disposition` header lines.

use std::borrow::Cow;

use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::content_type::{ContentType, OCTET_STREAM};

/// Bytes left unescaped in names and filenames: letters, digits and `_.-/`.
const QUOTE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'/');

/// Percent-encodes a header parameter value.
///
/// Every byte of the UTF-8 form outside [`QUOTE_SET`] becomes `%XX`.
#[must_use]
pub fn quote(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, QUOTE_SET).into()
}

/// File metadata carried by an upload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    filename: String,
    content_type: String,
}

impl FileMeta {
    /// Returns the percent-encoded filename.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the resolved MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// A single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    value: Bytes,
    file: Option<FileMeta>,
}

impl Field {
    /// Creates a field from the raw `add` arguments.
    ///
    /// A missing or empty `filename` makes this a value field, and any
    /// `content_type` is then ignored. For file fields a missing or empty
    /// `content_type` is guessed from the filename extension, falling back to
    /// `application/octet-stream`.
    #[must_use]
    pub fn new(
        name: &str,
        value: impl Into<Bytes>,
        filename: Option<&str>,
        content_type: Option<&str>,
    ) -> Self {
        Self::with_fallback(name, value, filename, content_type, OCTET_STREAM)
    }

    /// Creates a plain value field.
    #[must_use]
    pub fn text(name: &str, value: impl Into<Bytes>) -> Self {
        Self::new(name, value, None, None)
    }

    /// Creates a file upload field.
    #[must_use]
    pub fn file(
        name: &str,
        value: impl Into<Bytes>,
        filename: &str,
        content_type: Option<&str>,
    ) -> Self {
        Self::new(name, value, Some(filename), content_type)
    }

    /// Like [`Field::new`], with a custom type for unguessable files.
    pub(crate) fn with_fallback(
        name: &str,
        value: impl Into<Bytes>,
        filename: Option<&str>,
        content_type: Option<&str>,
        fallback: &str,
    ) -> Self {
        let file = filename.filter(|f| !f.is_empty()).map(|filename| {
            let content_type = match content_type.filter(|ct| !ct.is_empty()) {
                Some(explicit) => explicit.to_string(),
                None => ContentType::guess(filename)
                    .map_or_else(|| fallback.to_string(), |ct| ct.to_string()),
            };
            FileMeta {
                filename: quote(filename).into_owned(),
                content_type,
            }
        });

        Self {
            name: quote(name).into_owned(),
            value: value.into(),
            file,
        }
    }

    /// Returns the percent-encoded field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw field content.
    #[must_use]
    pub const fn value(&self) -> &Bytes {
        &self.value
    }

    /// Returns the percent-encoded filename for file fields.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.file.as_ref().map(FileMeta::filename)
    }

    /// Returns the MIME type for file fields.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.file.as_ref().map(FileMeta::content_type)
    }

    /// Returns the file metadata, if this is an upload.
    #[must_use]
    pub const fn file_meta(&self) -> Option<&FileMeta> {
        self.file.as_ref()
    }

    /// Checks if this field is a file upload.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        self.file.is_some()
    }
}
