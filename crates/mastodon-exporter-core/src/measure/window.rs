//! Day-bucketed request windows.
//!
//! All arithmetic is in UTC. A window always ends at the start of the current
//! UTC day, so it only ever covers complete days.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

const SECS_PER_DAY: f64 = 86_400.0;

/// Longest window a measure may request.
pub const MAX_WINDOW_DAYS: u32 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl MeasureWindow {
    /// `[today 00:00 UTC - days, today 00:00 UTC)`. `days` is clamped to
    /// `1..=MAX_WINDOW_DAYS`.
    pub fn ending_today(now: DateTime<Utc>, days: u32) -> Self {
        let end = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let start = end - Duration::days(i64::from(days.clamp(1, MAX_WINDOW_DAYS)));
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// First day inside the window (inclusive).
    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Last day inside the window (inclusive).
    pub fn last_day(&self) -> NaiveDate {
        (self.end - Duration::days(1)).date_naive()
    }

    pub fn duration_secs(&self) -> f64 {
        (self.end - self.start).num_days() as f64 * SECS_PER_DAY
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn one_day_window_is_yesterday() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap();
        let w = MeasureWindow::ending_today(now, 1);
        assert_eq!(w.end(), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(w.start(), Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(w.first_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(w.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn multi_day_window_spans_complete_days() {
        let now = Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap();
        let w = MeasureWindow::ending_today(now, 7);
        assert_eq!(w.first_day(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(w.last_day(), NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
        assert_eq!(w.duration_secs(), 7.0 * 86_400.0);
    }

    #[test]
    fn zero_days_is_clamped() {
        let now = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();
        assert_eq!(MeasureWindow::ending_today(now, 0), MeasureWindow::ending_today(now, 1));
    }

    #[test]
    fn huge_window_is_clamped() {
        let now = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();
        let w = MeasureWindow::ending_today(now, 4_000_000_000);
        assert_eq!(w, MeasureWindow::ending_today(now, MAX_WINDOW_DAYS));
        assert_eq!(w.duration_secs(), f64::from(MAX_WINDOW_DAYS) * 86_400.0);
    }
}
