//! Measure domain model.
//!
//! - `definition`: static descriptors (what to ask for, how to expose it)
//! - `value`: per-scrape results with an explicit value/absent/error tag
//! - `window`: UTC day-bucketed request windows
//! - `catalog`: the validated, ordered set of definitions served by a process

pub mod catalog;
pub mod definition;
pub mod value;
pub mod window;

pub use catalog::{Catalog, WindowGroup};
pub use definition::{MeasureDefinition, MetricType, Transform};
pub use value::{MeasureResult, MeasureValue};
pub use window::{MeasureWindow, MAX_WINDOW_DAYS};
