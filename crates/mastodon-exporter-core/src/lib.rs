//! mastodon-exporter core: measure definitions, results, windows, and the
//! admin API wire types shared by the exporter.
//!
//! This crate carries no transport or runtime dependencies. The HTTP client and
//! the exposition server live in `mastodon-exporter`; everything here is plain
//! data plus the conversions between upstream JSON and normalized results.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `ExporterError`/`Result`, and malformed upstream measures degrade
//! to `MeasureValue::Error` instead of failing a scrape.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod measure;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorKind, ExporterError, Result};
