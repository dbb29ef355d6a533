//! Derived, never-persisted aggregates.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::common::DateRange;
use super::record::DailyRecord;

/// Monday that opens the calendar week containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Aggregate of every record whose date falls inside one Monday..Sunday span.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_quantity: u64,
    pub total_value: f64,
    pub count: usize,
}

impl WeeklySummary {
    pub fn starting(week_start: NaiveDate) -> Self {
        let week_end = week_start
            .checked_add_days(Days::new(6))
            .unwrap_or(week_start);
        Self {
            week_start,
            week_end,
            total_quantity: 0,
            total_value: 0.0,
            count: 0,
        }
    }

    pub fn accumulate(&mut self, record: &DailyRecord) {
        self.total_quantity += u64::from(record.quantity);
        self.total_value += record.total_value;
        self.count += 1;
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.week_start && date <= self.week_end
    }

    /// Mean value per contributing record. Buckets are only created for a record,
    /// so `count` is at least one for any summary produced by grouping.
    pub fn average_value(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_value / self.count as f64
    }
}

/// Everything the report screen shows for one date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub range: DateRange,
    pub records: Vec<DailyRecord>,
    pub total_value: f64,
    pub total_quantity: u64,
    pub weeks: Vec<WeeklySummary>,
}

impl PeriodReport {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn average_value(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.total_value / self.records.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_is_monday_for_every_weekday() {
        let monday = date(2024, 1, 8);
        for offset in 0..7 {
            let day = monday + chrono::Duration::days(offset);
            assert_eq!(week_start_of(day), monday, "day {day}");
        }
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        assert_eq!(week_start_of(date(2024, 1, 14)), date(2024, 1, 8));
        assert_eq!(week_start_of(date(2024, 1, 15)), date(2024, 1, 15));
    }

    #[test]
    fn week_crossing_a_year_boundary() {
        assert_eq!(week_start_of(date(2025, 1, 1)), date(2024, 12, 30));
        let summary = WeeklySummary::starting(date(2024, 12, 30));
        assert_eq!(summary.week_end, date(2025, 1, 5));
    }

    #[test]
    fn accumulate_tracks_totals_and_average() {
        let mut summary = WeeklySummary::starting(date(2024, 1, 8));
        summary.accumulate(&DailyRecord::new(date(2024, 1, 8), 10, 5.0, Vec::new()));
        summary.accumulate(&DailyRecord::new(date(2024, 1, 9), 20, 5.0, Vec::new()));
        assert_eq!(summary.total_quantity, 30);
        assert_eq!(summary.total_value, 150.0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average_value(), 75.0);
        assert!(summary.contains(date(2024, 1, 14)));
        assert!(!summary.contains(date(2024, 1, 15)));
    }
}
