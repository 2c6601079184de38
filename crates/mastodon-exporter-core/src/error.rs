//! Shared error type across mastodon-exporter crates.

use thiserror::Error;

/// Stable error classes. The server maps these onto HTTP statuses and the
/// binary onto exit behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed startup configuration.
    Configuration,
    /// The measure catalog is inconsistent.
    InvalidCatalog,
    /// The admin API could not be reached or answered badly.
    UpstreamUnavailable,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// String code used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "CONFIGURATION",
            ErrorKind::InvalidCatalog => "INVALID_CATALOG",
            ErrorKind::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and the exporter.
///
/// Per-measure failures are not errors at this level; they travel as
/// [`crate::measure::MeasureValue::Error`] so one bad measure never fails a scrape.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Names the variable, never its value.
    #[error("configuration error ({var}): {reason}")]
    Configuration { var: String, reason: String },
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    pub fn configuration(var: &str, reason: impl Into<String>) -> Self {
        ExporterError::Configuration {
            var: var.to_string(),
            reason: reason.into(),
        }
    }

    /// Map to a stable error class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExporterError::Configuration { .. } => ErrorKind::Configuration,
            ExporterError::InvalidCatalog(_) => ErrorKind::InvalidCatalog,
            ExporterError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            ExporterError::Internal(_) => ErrorKind::Internal,
        }
    }
}
