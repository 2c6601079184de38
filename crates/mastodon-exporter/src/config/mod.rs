//! Exporter configuration: environment variables plus an optional strict YAML
//! catalog file.

pub mod schema;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use mastodon_exporter_core::error::{ExporterError, Result};
use mastodon_exporter_core::measure::Catalog;

pub use schema::{CatalogFile, Credentials, ExporterConfig, MeasureEntry};

pub const ENV_BASE_URL: &str = "MASTODON_BASE_URL";
pub const ENV_CLIENT_KEY: &str = "MASTODON_CLIENT_KEY";
pub const ENV_CLIENT_SECRET: &str = "MASTODON_CLIENT_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "MASTODON_ACCESS_TOKEN";
pub const ENV_PORT: &str = "PORT";
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "MASTODON_UPSTREAM_TIMEOUT_SECS";
pub const ENV_CATALOG_FILE: &str = "MASTODON_CATALOG_FILE";

pub fn load_from_env() -> Result<ExporterConfig> {
    load_from_lookup(|name| std::env::var(name).ok())
}

/// Build the config from any variable source. Empty values count as unset.
pub fn load_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<ExporterConfig> {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let required = |name: &str| {
        get(name).ok_or_else(|| ExporterError::configuration(name, "required but not set"))
    };

    let credentials = Credentials::new(
        &required(ENV_BASE_URL)?,
        required(ENV_CLIENT_KEY)?,
        required(ENV_CLIENT_SECRET)?,
        required(ENV_ACCESS_TOKEN)?,
    )?;

    let port = match get(ENV_PORT) {
        Some(raw) => parse_number(ENV_PORT, &raw)?,
        None => schema::DEFAULT_PORT,
    };
    let timeout_secs = match get(ENV_UPSTREAM_TIMEOUT_SECS) {
        Some(raw) => parse_number(ENV_UPSTREAM_TIMEOUT_SECS, &raw)?,
        None => schema::DEFAULT_UPSTREAM_TIMEOUT_SECS,
    };

    let cfg = ExporterConfig {
        credentials,
        port,
        upstream_timeout: Duration::from_secs(timeout_secs),
        catalog_file: get(ENV_CATALOG_FILE).map(PathBuf::from),
    };
    cfg.validate()?;
    Ok(cfg)
}

fn parse_number<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ExporterError::configuration(var, "must be a positive integer"))
}

/// The configured catalog file, or the built-in catalog.
pub fn load_catalog(cfg: &ExporterConfig) -> Result<Catalog> {
    match &cfg.catalog_file {
        None => Ok(Catalog::builtin()),
        Some(path) => {
            let s = fs::read_to_string(path).map_err(|e| {
                ExporterError::configuration(
                    ENV_CATALOG_FILE,
                    format!("read {} failed: {e}", path.display()),
                )
            })?;
            load_catalog_str(&s)
        }
    }
}

pub fn load_catalog_str(s: &str) -> Result<Catalog> {
    let file: CatalogFile = serde_yaml::from_str(s)
        .map_err(|e| ExporterError::InvalidCatalog(format!("invalid yaml: {e}")))?;
    file.into_catalog()
}
