//! Prometheus text exposition (format 0.0.4).
//!
//! One block per catalog entry, in catalog order: `# HELP`, `# TYPE`, and a
//! sample line only when the measure has a value. Absent or failed measures
//! keep their HELP/TYPE lines so the series stays declared.

use std::fmt::Write;

use mastodon_exporter_core::measure::{Catalog, MeasureResult};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escape `# HELP` text.
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Bare number; integral values without a fractional part.
fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf".into() } else { "-Inf".into() }
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Render `results`, which must be aligned with `catalog.definitions()`.
pub fn render(catalog: &Catalog, results: &[MeasureResult]) -> String {
    let mut out = String::new();
    for (def, result) in catalog.definitions().iter().zip(results) {
        let name = &def.metric_name;
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(&def.help));
        let _ = writeln!(out, "# TYPE {} {}", name, def.metric_type.as_str());
        if let Some(raw) = result.value.as_f64() {
            let v = def.apply(raw, result.period_secs());
            let _ = writeln!(out, "{} {}", name, format_value(v));
        }
    }
    out
}
