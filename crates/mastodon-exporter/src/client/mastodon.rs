//! Admin API client.
//!
//! - One `reqwest::Client` per process (connection pool, fixed timeout)
//! - Bearer token auth on every request; no session state
//! - No retries: a failed scrape is simply missing from the time series

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use mastodon_exporter_core::error::{ExporterError, Result};
use mastodon_exporter_core::measure::{MeasureDefinition, MeasureResult, MeasureWindow};
use mastodon_exporter_core::protocol::admin::{match_results, parse_measures, MeasuresRequest};
use mastodon_exporter_core::protocol::instance::{AppInfo, InstanceInfo};

use crate::client::MeasureSource;
use crate::config::Credentials;

const MEASURES_PATH: &str = "/api/v1/admin/measures";
const VERIFY_CREDENTIALS_PATH: &str = "/api/v1/apps/verify_credentials";
const INSTANCE_PATH: &str = "/api/v1/instance";

pub struct MastodonClient {
    credentials: Credentials,
    http: reqwest::Client,
}

impl MastodonClient {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mastodon-exporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExporterError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self { credentials, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.credentials.base_url(), path)
    }

    /// `POST /api/v1/admin/measures` for the given keys and window.
    pub async fn fetch_measures(
        &self,
        window: MeasureWindow,
        defs: &[&MeasureDefinition],
    ) -> Result<Vec<MeasureResult>> {
        let keys = defs.iter().map(|d| d.key.as_str()).collect();
        let request = MeasuresRequest::new(keys, &window);

        let resp = self
            .http
            .post(self.url(MEASURES_PATH))
            .bearer_auth(self.credentials.access_token())
            .json(&request)
            .send()
            .await
            .map_err(|e| upstream_error("admin measures request failed", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExporterError::UpstreamUnavailable(format!(
                "admin measures returned status {status}"
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| upstream_error("admin measures body read failed", e))?;
        let raw = parse_measures(&body)?;

        tracing::debug!(
            start = %request.start_at,
            end = %request.end_at,
            returned = raw.len(),
            "admin measures fetched"
        );
        Ok(match_results(defs, &raw, &window))
    }

    /// Resolve the application name and server version for the startup log.
    pub async fn verify(&self) -> Result<(AppInfo, InstanceInfo)> {
        let app = self.get_json::<AppInfo>(VERIFY_CREDENTIALS_PATH).await?;
        let instance = self.get_json::<InstanceInfo>(INSTANCE_PATH).await?;
        Ok((app, instance))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(self.credentials.access_token())
            .send()
            .await
            .map_err(|e| upstream_error("request failed", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExporterError::UpstreamUnavailable(format!(
                "{path} returned status {status}"
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| upstream_error("malformed response", e))
    }
}

#[async_trait]
impl MeasureSource for MastodonClient {
    async fn fetch(
        &self,
        window: MeasureWindow,
        defs: &[&MeasureDefinition],
    ) -> Result<Vec<MeasureResult>> {
        self.fetch_measures(window, defs).await
    }
}

fn upstream_error(what: &str, e: reqwest::Error) -> ExporterError {
    if e.is_timeout() {
        ExporterError::UpstreamUnavailable(format!("{what}: timed out"))
    } else {
        ExporterError::UpstreamUnavailable(format!("{what}: {e}"))
    }
}
