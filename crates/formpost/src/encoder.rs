//! Multipart form-data body encoder.

use std::sync::OnceLock;

use bytes::{BufMut, Bytes, BytesMut};

use crate::boundary::Boundary;
use crate::config::Config;
use crate::content_type::ContentType;
use crate::field::Field;
use crate::header::Headers;

const CRLF: &[u8] = b"\r\n";

/// An HTTP POST `multipart/form-data` request encoder.
///
/// Fields are appended with [`Encoder::add`] and friends. The body is
/// rendered on first read and cached until another field is added.
///
/// All value fields are written before all file fields, each group in
/// insertion order.
#[derive(Debug, Clone)]
pub struct Encoder {
    boundary: Boundary,
    content_type: String,
    fallback_content_type: String,
    fields: Vec<Field>,
    body: OnceLock<Bytes>,
}

impl Encoder {
    /// Creates an encoder with a fresh random boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates an encoder using the given configuration.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        let boundary = Boundary::generate(config.entropy_bytes, config.legacy_prefix);
        Self::build(boundary, config.fallback_content_type.clone())
    }

    /// Creates an encoder with a caller-supplied boundary.
    ///
    /// Useful for reproducible output; the caller is responsible for
    /// choosing a token that does not occur in any field content.
    #[must_use]
    pub fn with_boundary(boundary: Boundary) -> Self {
        Self::build(boundary, Config::default().fallback_content_type)
    }

    fn build(boundary: Boundary, fallback_content_type: String) -> Self {
        let content_type = ContentType::form_data(boundary.as_str()).to_string();
        Self {
            boundary,
            content_type,
            fallback_content_type,
            fields: Vec::new(),
            body: OnceLock::new(),
        }
    }

    /// Adds a variable or file to this request.
    ///
    /// `filename` marks the field as a file upload. `content_type` only
    /// applies to files; when absent it is guessed from `filename`.
    pub fn add(
        &mut self,
        name: &str,
        value: impl Into<Bytes>,
        filename: Option<&str>,
        content_type: Option<&str>,
    ) {
        let field = Field::with_fallback(
            name,
            value,
            filename,
            content_type,
            &self.fallback_content_type,
        );
        self.push(field);
    }

    /// Adds a plain key/value variable.
    pub fn add_text(&mut self, name: &str, value: impl Into<Bytes>) {
        self.add(name, value, None, None);
    }

    /// Adds a file upload.
    pub fn add_file(
        &mut self,
        name: &str,
        value: impl Into<Bytes>,
        filename: &str,
        content_type: Option<&str>,
    ) {
        self.add(name, value, Some(filename), content_type);
    }

    /// Appends an already constructed field.
    pub fn push(&mut self, field: Field) {
        tracing::debug!(
            name = field.name(),
            file = field.is_file(),
            size = field.value().len(),
            "Adding form field"
        );
        self.fields.push(field);
        self.body.take();
    }

    /// Returns the boundary separating body sections.
    #[must_use]
    pub const fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Returns the fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Checks if no fields have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the `Content-Type` header value for this request.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the encoded body, rendering it if fields changed.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        self.cached_body()
    }

    /// Returns a cheap shared handle to the encoded body.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        self.cached_body().clone()
    }

    /// Consumes the encoder and returns the encoded body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        match self.body.into_inner() {
            Some(body) => body,
            None => render(&self.boundary, &self.fields),
        }
    }

    /// Returns the body length in bytes.
    #[must_use]
    pub fn content_length(&self) -> usize {
        self.cached_body().len()
    }

    /// Returns the body length as a `Content-Length` header value.
    #[must_use]
    pub fn length(&self) -> String {
        self.content_length().to_string()
    }

    /// Returns the `Content-Type` and `Content-Length` request headers.
    #[must_use]
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.add("Content-Type", self.content_type.as_str());
        headers.add("Content-Length", self.length());
        headers
    }

    fn cached_body(&self) -> &Bytes {
        self.body.get_or_init(|| render(&self.boundary, &self.fields))
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Field> for Encoder {
    fn extend<I: IntoIterator<Item = Field>>(&mut self, iter: I) {
        for field in iter {
            self.push(field);
        }
    }
}

/// Renders the multipart body: value fields first, then file fields, then
/// the closing delimiter. Every line ends in CRLF.
fn render(boundary: &Boundary, fields: &[Field]) -> Bytes {
    let delimiter = boundary.delimiter();
    let (files, values): (Vec<&Field>, Vec<&Field>) = fields.iter().partition(|f| f.is_file());

    let capacity = fields
        .iter()
        .map(|f| f.value().len() + f.name().len() + delimiter.len() + 128)
        .sum::<usize>()
        + delimiter.len()
        + 4;
    let mut buf = BytesMut::with_capacity(capacity);

    for field in values.iter().chain(files.iter()) {
        put_line(&mut buf, delimiter.as_bytes());

        buf.put_slice(b"Content-Disposition: form-data; name=\"");
        buf.put_slice(field.name().as_bytes());
        buf.put_u8(b'"');
        if let Some(meta) = field.file_meta() {
            buf.put_slice(b"; filename=\"");
            buf.put_slice(meta.filename().as_bytes());
            buf.put_u8(b'"');
            buf.put_slice(CRLF);

            buf.put_slice(b"Content-Type: ");
            buf.put_slice(meta.content_type().as_bytes());
        }
        buf.put_slice(CRLF);

        buf.put_slice(CRLF);
        put_line(&mut buf, field.value());
    }

    put_line(&mut buf, boundary.close_delimiter().as_bytes());

    tracing::trace!(
        values = values.len(),
        files = files.len(),
        bytes = buf.len(),
        "Rendered multipart body"
    );

    buf.freeze()
}

fn put_line(buf: &mut BytesMut, line: &[u8]) {
    buf.put_slice(line);
    buf.put_slice(CRLF);
}
