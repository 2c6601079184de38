//! Scrape-time collection.
//!
//! The catalog is split into window groups; each group costs one upstream
//! call and the groups run concurrently. Any group failing fails the scrape:
//! partial output would be indistinguishable from real values downstream.

use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;

use mastodon_exporter_core::error::{ExporterError, Result};
use mastodon_exporter_core::measure::{Catalog, MeasureDefinition, MeasureResult, MeasureWindow};

use crate::client::MeasureSource;

/// Fetch every catalog entry. The result is aligned with
/// `catalog.definitions()`.
pub async fn collect(
    source: &dyn MeasureSource,
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> Result<Vec<MeasureResult>> {
    let defs = catalog.definitions();
    let groups = catalog.window_groups();

    let fetched = try_join_all(groups.iter().map(|group| async move {
        let window = MeasureWindow::ending_today(now, group.window_days);
        let group_defs: Vec<&MeasureDefinition> = group.indices.iter().map(|&i| &defs[i]).collect();
        let results = source.fetch(window, &group_defs).await?;
        if results.len() != group_defs.len() {
            return Err(ExporterError::Internal(format!(
                "source returned {} results for {} measures",
                results.len(),
                group_defs.len()
            )));
        }
        Ok(group.indices.iter().copied().zip(results).collect::<Vec<_>>())
    }))
    .await?;

    let mut slots: Vec<Option<MeasureResult>> = vec![None; defs.len()];
    for (i, result) in fetched.into_iter().flatten() {
        slots[i] = Some(result);
    }

    slots
        .into_iter()
        .map(|slot| slot.ok_or_else(|| ExporterError::Internal("catalog entry not collected".into())))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;

    use mastodon_exporter_core::measure::MeasureValue;

    use super::*;

    /// Echoes each key's window length as its value and records calls.
    #[derive(Default)]
    struct WindowEcho {
        calls: Mutex<Vec<(u32, Vec<String>)>>,
    }

    #[async_trait]
    impl MeasureSource for WindowEcho {
        async fn fetch(
            &self,
            window: MeasureWindow,
            defs: &[&MeasureDefinition],
        ) -> Result<Vec<MeasureResult>> {
            let days = (window.duration_secs() / 86_400.0) as u32;
            self.calls
                .lock()
                .unwrap()
                .push((days, defs.iter().map(|d| d.key.clone()).collect()));
            Ok(defs
                .iter()
                .map(|d| MeasureResult::new(d.key.clone(), MeasureValue::Value(days.into()), &window))
                .collect())
        }
    }

    struct Failing;

    #[async_trait]
    impl MeasureSource for Failing {
        async fn fetch(&self, _: MeasureWindow, _: &[&MeasureDefinition]) -> Result<Vec<MeasureResult>> {
            Err(ExporterError::UpstreamUnavailable("boom".into()))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn one_call_per_window_results_in_catalog_order() {
        let source = WindowEcho::default();
        let catalog = Catalog::builtin();
        let results = collect(&source, &catalog, now()).await.unwrap();

        let values: Vec<_> = results.iter().map(|r| r.value.as_f64().unwrap()).collect();
        assert_eq!(values, [1.0, 1.0, 1.0, 1.0, 1.0, 7.0, 30.0]);

        let mut calls = source.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].1.len(), 5);
        assert_eq!(calls[1], (7, vec!["active_users".to_string()]));
    }

    #[tokio::test]
    async fn any_failure_fails_the_scrape() {
        let err = collect(&Failing, &Catalog::builtin(), now()).await.unwrap_err();
        assert!(matches!(err, ExporterError::UpstreamUnavailable(_)));
    }
}
