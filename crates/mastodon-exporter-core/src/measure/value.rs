use chrono::{DateTime, Utc};

use crate::measure::MeasureWindow;

/// Outcome of one measure within a scrape.
///
/// `Absent` and `Error` are both rendered as a missing sample; they are kept
/// apart so logs can tell "upstream had nothing" from "upstream said no".
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureValue {
    Value(f64),
    Absent,
    Error(String),
}

impl MeasureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MeasureValue::Value(v) => Some(*v),
            MeasureValue::Absent | MeasureValue::Error(_) => None,
        }
    }
}

/// One normalized measure for one scrape. Never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureResult {
    pub key: String,
    pub value: MeasureValue,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

impl MeasureResult {
    pub fn new(key: impl Into<String>, value: MeasureValue, window: &MeasureWindow) -> Self {
        Self {
            key: key.into(),
            value,
            period_start: window.start(),
            period_end: window.end(),
        }
    }

    /// Length of the period the value covers.
    pub fn period_secs(&self) -> f64 {
        (self.period_end - self.period_start).num_seconds() as f64
    }
}
