//! Thread-safe encoder handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;

use crate::encoder::Encoder;
use crate::field::Field;
use crate::header::Headers;

/// A cloneable handle to an [`Encoder`] shared between threads.
///
/// Adding a field and invalidating the cached body happen under one lock,
/// so readers never observe a body that is missing an added field.
#[derive(Debug, Clone, Default)]
pub struct SharedEncoder {
    inner: Arc<Mutex<Encoder>>,
}

impl SharedEncoder {
    /// Creates a shared handle with a fresh encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::from(Encoder::new())
    }

    // Encoder state is consistent between calls; poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Encoder> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a variable or file. See [`Encoder::add`].
    pub fn add(
        &self,
        name: &str,
        value: impl Into<Bytes>,
        filename: Option<&str>,
        content_type: Option<&str>,
    ) {
        self.lock().add(name, value, filename, content_type);
    }

    /// Appends an already constructed field.
    pub fn push(&self, field: Field) {
        self.lock().push(field);
    }

    /// Returns a snapshot of the encoded body.
    #[must_use]
    pub fn body(&self) -> Bytes {
        self.lock().to_bytes()
    }

    /// Returns the `Content-Type` header value.
    #[must_use]
    pub fn content_type(&self) -> String {
        self.lock().content_type().to_string()
    }

    /// Returns the body length as a `Content-Length` header value.
    #[must_use]
    pub fn length(&self) -> String {
        self.lock().length()
    }

    /// Returns the `Content-Type` and `Content-Length` request headers.
    #[must_use]
    pub fn headers(&self) -> Headers {
        self.lock().headers()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks if no fields have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl From<Encoder> for SharedEncoder {
    fn from(encoder: Encoder) -> Self {
        Self {
            inner: Arc::new(Mutex::new(encoder)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use std::thread;

    #[test]
    fn test_shared_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedEncoder>();
    }

    #[test]
    fn test_concurrent_adds() {
        let shared = SharedEncoder::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for j in 0..25 {
                        shared.add(&format!("f{i}_{j}"), format!("v{j}"), None, None);
                        assert!(shared.body().ends_with(b"--\r\n"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 200);
        let body = shared.body();
        assert_eq!(shared.length(), body.len().to_string());
        let sections = body
            .windows(20)
            .filter(|w| *w == b"Content-Disposition:")
            .count();
        assert_eq!(sections, 200);
    }

    #[test]
    fn test_body_reflects_add() {
        let shared = SharedEncoder::from(Encoder::with_boundary(Boundary::new("b").unwrap()));
        assert_eq!(shared.body().as_ref(), b"--b--\r\n");

        shared.push(Field::text("k", "v"));
        assert_eq!(
            shared.body().as_ref(),
            b"--b\r\nContent-Disposition: form-data; name=\"k\"\r\n\r\nv\r\n--b--\r\n"
        );
        assert_eq!(shared.content_type(), "multipart/form-data; boundary=b");
        assert_eq!(shared.headers().get("Content-Length"), Some("59"));
    }
}
