use serde::Deserialize;

/// Exposition type of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Gauge,
    Counter,
}

impl MetricType {
    /// Token used on the `# TYPE` line.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Gauge => "gauge",
            MetricType::Counter => "counter",
        }
    }
}

/// Optional post-processing of an upstream total before it is exposed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Divide by a constant (e.g. cents -> units).
    Divide(f64),
    /// Average rate over the request window, per second.
    PerSecond,
}

/// Static descriptor of one exposed measure.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureDefinition {
    /// Measure key as known to the admin API (`new_users`, `active_users`, ...).
    pub key: String,
    /// Exposed metric name.
    pub metric_name: String,
    /// `# HELP` text.
    pub help: String,
    pub metric_type: MetricType,
    /// Length of the request window in whole days (>= 1).
    pub window_days: u32,
    pub transform: Option<Transform>,
}

impl MeasureDefinition {
    /// A one-day definition without transform.
    pub fn new(
        key: impl Into<String>,
        metric_name: impl Into<String>,
        help: impl Into<String>,
        metric_type: MetricType,
    ) -> Self {
        Self {
            key: key.into(),
            metric_name: metric_name.into(),
            help: help.into(),
            metric_type,
            window_days: 1,
            transform: None,
        }
    }

    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Apply the configured transform to a raw upstream value measured over
    /// `period_secs`.
    pub fn apply(&self, raw: f64, period_secs: f64) -> f64 {
        match self.transform {
            None => raw,
            Some(Transform::Divide(d)) => raw / d,
            Some(Transform::PerSecond) if period_secs > 0.0 => raw / period_secs,
            Some(Transform::PerSecond) => raw,
        }
    }
}
