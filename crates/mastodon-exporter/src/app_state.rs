//! Shared application state for the exporter.
//!
//! Everything here is immutable after startup: the catalog and the measure
//! source (which owns the credentials). Handlers clone the `Arc`s.

use std::sync::Arc;

use mastodon_exporter_core::error::Result;
use mastodon_exporter_core::measure::Catalog;

use crate::client::{MastodonClient, MeasureSource};
use crate::config::{self, ExporterConfig};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
    source: Arc<dyn MeasureSource>,
}

impl AppState {
    pub fn new(catalog: Catalog, source: Arc<dyn MeasureSource>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { catalog, source }),
        }
    }

    /// Build production state: configured catalog + admin API client.
    pub fn from_config(cfg: &ExporterConfig) -> Result<(Self, Arc<MastodonClient>)> {
        let catalog = config::load_catalog(cfg)?;
        let client = Arc::new(MastodonClient::new(
            cfg.credentials.clone(),
            cfg.upstream_timeout,
        )?);
        let source: Arc<dyn MeasureSource> = client.clone();
        Ok((Self::new(catalog, source), client))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn source(&self) -> Arc<dyn MeasureSource> {
        Arc::clone(&self.inner.source)
    }
}
