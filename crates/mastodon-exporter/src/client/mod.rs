//! Measure sources.
//!
//! `MeasureSource` is the seam between the scrape handler and the upstream:
//! production uses [`MastodonClient`], tests plug in canned sources.

pub mod mastodon;

use async_trait::async_trait;

use mastodon_exporter_core::error::Result;
use mastodon_exporter_core::measure::{MeasureDefinition, MeasureResult, MeasureWindow};

pub use mastodon::MastodonClient;

#[async_trait]
pub trait MeasureSource: Send + Sync {
    /// Fetch `defs` over `window` with a single upstream call.
    ///
    /// Returns exactly one result per definition, in the same order. Fails as a
    /// whole with `UpstreamUnavailable` if the upstream cannot answer.
    async fn fetch(
        &self,
        window: MeasureWindow,
        defs: &[&MeasureDefinition],
    ) -> Result<Vec<MeasureResult>>;
}
