use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use mastodon_exporter_core::error::{ExporterError, Result};
use mastodon_exporter_core::measure::{Catalog, MeasureDefinition, MetricType, Transform};

use super::{ENV_BASE_URL, ENV_PORT, ENV_UPSTREAM_TIMEOUT_SECS};

pub const DEFAULT_PORT: u16 = 9876;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Upstream credentials. Read-only for the process lifetime.
///
/// Only the access token is sent, as a bearer token.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    #[allow(dead_code)]
    client_key: String,
    #[allow(dead_code)]
    client_secret: String,
    access_token: String,
}

impl Credentials {
    pub fn new(
        base_url: &str,
        client_key: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            client_key: client_key.into(),
            client_secret: client_secret.into(),
            access_token: access_token.into(),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("client_key", &"<redacted>")
            .field("client_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ExporterError::configuration(ENV_BASE_URL, format!("not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ExporterError::configuration(
            ENV_BASE_URL,
            "must be an absolute http(s) URL",
        ));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub credentials: Credentials,
    pub port: u16,
    pub upstream_timeout: Duration,
    pub catalog_file: Option<PathBuf>,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ExporterError::configuration(ENV_PORT, "must be between 1 and 65535"));
        }
        if !(1..=120).contains(&self.upstream_timeout.as_secs()) {
            return Err(ExporterError::configuration(
                ENV_UPSTREAM_TIMEOUT_SECS,
                "must be between 1 and 120",
            ));
        }
        Ok(())
    }
}

/// YAML catalog file.
///
/// ```yaml
/// version: 1
/// measures:
///   - key: new_users
///     metric_name: mastodon_new_users
///     help: New sign-ups yesterday
///     type: gauge
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    pub version: u32,
    pub measures: Vec<MeasureEntry>,
}

impl CatalogFile {
    pub fn into_catalog(self) -> Result<Catalog> {
        if self.version != 1 {
            return Err(ExporterError::InvalidCatalog(format!(
                "unsupported catalog version: {}",
                self.version
            )));
        }
        let defs = self
            .measures
            .into_iter()
            .map(MeasureEntry::into_definition)
            .collect::<Result<Vec<_>>>()?;
        Catalog::new(defs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasureEntry {
    pub key: String,
    pub metric_name: String,
    pub help: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default)]
    pub divide_by: Option<f64>,
    #[serde(default)]
    pub per_second: bool,
}

impl MeasureEntry {
    fn into_definition(self) -> Result<MeasureDefinition> {
        let transform = match (self.divide_by, self.per_second) {
            (Some(_), true) => {
                return Err(ExporterError::InvalidCatalog(format!(
                    "metric {}: divide_by and per_second are exclusive",
                    self.metric_name
                )))
            }
            (Some(by), false) => Some(Transform::Divide(by)),
            (None, true) => Some(Transform::PerSecond),
            (None, false) => None,
        };

        let mut def = MeasureDefinition::new(self.key, self.metric_name, self.help, self.metric_type)
            .with_window_days(self.window_days);
        if let Some(t) = transform {
            def = def.with_transform(t);
        }
        Ok(def)
    }
}

fn default_window_days() -> u32 {
    1
}
