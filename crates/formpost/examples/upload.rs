//! Example: build a browser-style upload request
//!
//! Encodes a form with one plain variable and two files, then prints the
//! request headers and body that an HTTP client would send.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=formpost=trace cargo run -p formpost --example upload
//! ```

use formpost::{Config, Encoder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> formpost::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formpost=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::builder()
        .fallback_content_type("application/octet-stream")
        .build()?;

    let mut upload = Encoder::with_config(&config);
    upload.add("report", "%PDF-1.4 ...", Some("quarterly report.pdf"), None);
    upload.add("title", "Q3 numbers", None, None);
    upload.add_file("notes", "plain text", "notes.xyz123", Some("text/plain"));

    println!("POST /upload HTTP/1.1");
    print!("{}", upload.headers());
    println!();
    print!("{}", String::from_utf8_lossy(upload.body()));

    Ok(())
}
