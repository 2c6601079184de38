//! The validated, ordered set of measures a process exposes.
//!
//! Order is significant: exposition blocks are rendered in catalog order so
//! consecutive scrapes diff cleanly.

use std::collections::HashSet;

use crate::error::{ExporterError, Result};
use crate::measure::{MeasureDefinition, MetricType, Transform, MAX_WINDOW_DAYS};

/// Keys fetched once per day as plain counts.
const DAILY_COUNTERS: [&str; 4] = ["interactions", "new_users", "opened_reports", "resolved_reports"];

/// Keys counting distinct occurrences; fetched over several windows.
const UNIQUE_MEASURES: [&str; 1] = ["active_users"];

/// Definitions sharing one request window, as indices into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowGroup {
    pub window_days: u32,
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    defs: Vec<MeasureDefinition>,
}

impl Catalog {
    /// Validate and build a catalog.
    ///
    /// Rejects: empty catalogs, invalid metric names, duplicate metric names,
    /// duplicate `(key, window_days)` pairs, windows outside
    /// `1..=MAX_WINDOW_DAYS`, and divide
    /// transforms by zero or a non-finite number.
    pub fn new(defs: Vec<MeasureDefinition>) -> Result<Self> {
        if defs.is_empty() {
            return Err(ExporterError::InvalidCatalog("catalog must not be empty".into()));
        }

        let mut names = HashSet::new();
        let mut keys = HashSet::new();
        for d in &defs {
            if d.key.is_empty() {
                return Err(ExporterError::InvalidCatalog(format!(
                    "metric {} has an empty key",
                    d.metric_name
                )));
            }
            if !is_valid_metric_name(&d.metric_name) {
                return Err(ExporterError::InvalidCatalog(format!(
                    "invalid metric name: {:?}",
                    d.metric_name
                )));
            }
            if !(1..=MAX_WINDOW_DAYS).contains(&d.window_days) {
                return Err(ExporterError::InvalidCatalog(format!(
                    "metric {} must have window_days between 1 and {MAX_WINDOW_DAYS}",
                    d.metric_name
                )));
            }
            if let Some(Transform::Divide(by)) = d.transform {
                if by == 0.0 || !by.is_finite() {
                    return Err(ExporterError::InvalidCatalog(format!(
                        "metric {} divides by {by}",
                        d.metric_name
                    )));
                }
            }
            if !names.insert(d.metric_name.as_str()) {
                return Err(ExporterError::InvalidCatalog(format!(
                    "duplicate metric name: {}",
                    d.metric_name
                )));
            }
            if !keys.insert((d.key.as_str(), d.window_days)) {
                return Err(ExporterError::InvalidCatalog(format!(
                    "duplicate measure key {} for a {}d window",
                    d.key, d.window_days
                )));
            }
        }

        Ok(Self { defs })
    }

    /// The measures exposed when no catalog file is configured.
    pub fn builtin() -> Self {
        let mut defs = Vec::new();

        for key in DAILY_COUNTERS {
            defs.push(MeasureDefinition::new(
                key,
                format!("mastodon_measure_{key}"),
                format!("Count of {key} from the last day"),
                MetricType::Counter,
            ));
        }

        for key in UNIQUE_MEASURES {
            defs.push(MeasureDefinition::new(
                key,
                format!("mastodon_measure_{key}_unique_1d"),
                format!("Unique instances of {key} from the last day"),
                MetricType::Counter,
            ));
            for days in [7, 30] {
                defs.push(
                    MeasureDefinition::new(
                        key,
                        format!("mastodon_measure_{key}_unique_{days}d"),
                        format!("Unique instances of {key} from the last {days} days"),
                        MetricType::Gauge,
                    )
                    .with_window_days(days),
                );
            }
        }

        Self { defs }
    }

    pub fn definitions(&self) -> &[MeasureDefinition] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Group definitions by window, in order of first appearance.
    pub fn window_groups(&self) -> Vec<WindowGroup> {
        let mut groups: Vec<WindowGroup> = Vec::new();
        for (i, d) in self.defs.iter().enumerate() {
            match groups.iter_mut().find(|g| g.window_days == d.window_days) {
                Some(g) => g.indices.push(i),
                None => groups.push(WindowGroup {
                    window_days: d.window_days,
                    indices: vec![i],
                }),
            }
        }
        groups
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}
