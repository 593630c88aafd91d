//! # formpost
//!
//! HTTP POST `multipart/form-data` request encoder for browser-style file
//! uploads (RFC 7578).
//!
//! ## Features
//!
//! - **Value and file fields**: plain variables and uploads in one body
//! - **MIME guessing**: file content types inferred from the extension
//! - **Random boundaries**: generated from the OS CSPRNG
//! - **Cached body**: rendered once, re-rendered only after new fields
//! - **Request headers**: `Content-Type` and `Content-Length` ready to send
//!
//! ## Quick Start
//!
//! ```
//! use formpost::Encoder;
//!
//! let mut upload = Encoder::new();
//! upload.add("b", "BINARY STRING", Some("filename.pdf"), None);
//! upload.add("a", "hello", None, None);
//!
//! let body = upload.body();
//! assert_eq!(upload.length(), body.len().to_string());
//! assert!(upload.content_type().starts_with("multipart/form-data; boundary=-----"));
//! ```
//!
//! ### Deterministic Output
//!
//! ```
//! use formpost::{Boundary, Encoder};
//!
//! let mut form = Encoder::with_boundary(Boundary::new("XyZ")?);
//! form.add_text("a", "hello");
//! assert_eq!(
//!     form.body(),
//!     b"--XyZ\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\nhello\r\n--XyZ--\r\n"
//! );
//! # Ok::<(), formpost::Error>(())
//! ```
//!
//! ### Configuration
//!
//! ```
//! use formpost::{Config, Encoder};
//!
//! let config = Config::builder()
//!     .entropy_bytes(48)
//!     .fallback_content_type("binary/unknown")
//!     .build()?;
//! let form = Encoder::with_config(&config);
//! assert!(form.boundary().as_str().len() <= 70);
//! # Ok::<(), formpost::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod content_type;
mod encoder;
mod error;
mod field;
mod header;
mod shared;

pub mod boundary;

pub use boundary::Boundary;
pub use config::{Config, ConfigBuilder};
pub use content_type::{ContentType, OCTET_STREAM};
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use field::{Field, FileMeta, quote};
pub use header::Headers;
pub use shared::SharedEncoder;
