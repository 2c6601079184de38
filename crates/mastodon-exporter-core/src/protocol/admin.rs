//! Admin dashboard measures.
//!
//! Request: `POST /api/v1/admin/measures` with
//! `{"keys": [...], "start_at": "YYYY-MM-DD", "end_at": "YYYY-MM-DD"}`
//! (both dates inclusive).
//!
//! Response: a JSON array, one object per known key:
//! `{"key": "new_users", "unit": null, "total": "7", "previous_total": "5", "data": [...]}`.
//! `total` usually arrives as a numeric string. An object may instead carry an
//! `error` field; that degrades only its own measure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExporterError, Result};
use crate::measure::{MeasureDefinition, MeasureResult, MeasureValue, MeasureWindow};

#[derive(Debug, Serialize)]
pub struct MeasuresRequest<'a> {
    pub keys: Vec<&'a str>,
    pub start_at: NaiveDate,
    pub end_at: NaiveDate,
}

impl<'a> MeasuresRequest<'a> {
    pub fn new(keys: Vec<&'a str>, window: &MeasureWindow) -> Self {
        Self {
            keys,
            start_at: window.first_day(),
            end_at: window.last_day(),
        }
    }
}

/// One element of the measures response, loosely typed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMeasure {
    pub key: String,
    #[serde(default)]
    pub total: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RawMeasure {
    /// Collapse the loose upstream shape into a tagged value.
    pub fn value(&self) -> MeasureValue {
        if let Some(err) = &self.error {
            let reason = match err {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return MeasureValue::Error(reason);
        }
        match &self.total {
            None | Some(Value::Null) => MeasureValue::Absent,
            Some(total) => coerce_total(total),
        }
    }
}

fn coerce_total(total: &Value) -> MeasureValue {
    match total {
        Value::Number(n) => match n.as_f64() {
            Some(v) => MeasureValue::Value(v),
            None => MeasureValue::Error(format!("unrepresentable total: {n}")),
        },
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => MeasureValue::Value(v),
            _ => MeasureValue::Error(format!("non-numeric total: {s:?}")),
        },
        other => MeasureValue::Error(format!("unexpected total: {other}")),
    }
}

/// Parse a 2xx response body.
///
/// The body as a whole must be a JSON array; anything else means the upstream
/// is not answering as the admin API and fails the scrape. Individual elements
/// that are not measure objects are skipped.
pub fn parse_measures(body: &[u8]) -> Result<Vec<RawMeasure>> {
    let items: Vec<Value> = serde_json::from_slice(body).map_err(|e| {
        ExporterError::UpstreamUnavailable(format!("malformed measures response: {e}"))
    })?;

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<RawMeasure>(item) {
            Ok(m) => out.push(m),
            Err(e) => tracing::debug!(error = %e, "skipping malformed measure object"),
        }
    }
    Ok(out)
}

/// Produce exactly one result per definition, in definition order.
///
/// Upstream keys nobody asked for are ignored; requested keys upstream did not
/// return become `Absent`. If a key appears twice the first object wins.
pub fn match_results(
    defs: &[&MeasureDefinition],
    raw: &[RawMeasure],
    window: &MeasureWindow,
) -> Vec<MeasureResult> {
    defs.iter()
        .map(|d| {
            let value = match raw.iter().find(|m| m.key == d.key) {
                Some(m) => m.value(),
                None => MeasureValue::Absent,
            };
            match &value {
                MeasureValue::Error(reason) => {
                    tracing::debug!(key = %d.key, %reason, "measure reported an error");
                }
                MeasureValue::Absent => {
                    tracing::debug!(key = %d.key, "measure missing from response");
                }
                MeasureValue::Value(_) => {}
            }
            MeasureResult::new(d.key.clone(), value, window)
        })
        .collect()
}
