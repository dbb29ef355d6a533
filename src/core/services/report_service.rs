//! Period filtering, totals, and calendar-week grouping over record lists.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{
    summary::week_start_of, DailyRecord, DateRange, PeriodReport, WeeklySummary,
};

pub struct ReportService;

impl ReportService {
    /// Records dated within `[start, end]`, oldest first. Equal dates keep their
    /// input order; an inverted range matches nothing.
    pub fn filter_by_range(
        records: &[DailyRecord],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<DailyRecord> {
        let mut filtered: Vec<DailyRecord> = records
            .iter()
            .filter(|record| record.date >= start && record.date <= end)
            .cloned()
            .collect();
        filtered.sort_by_key(|record| record.date);
        filtered
    }

    pub fn total_value(records: &[DailyRecord]) -> f64 {
        records.iter().map(|record| record.total_value).sum()
    }

    pub fn total_quantity(records: &[DailyRecord]) -> u64 {
        records.iter().map(|record| u64::from(record.quantity)).sum()
    }

    /// Buckets records by the Monday of their week, most recent week first.
    pub fn group_by_week(records: &[DailyRecord]) -> Vec<WeeklySummary> {
        let mut buckets: BTreeMap<NaiveDate, WeeklySummary> = BTreeMap::new();
        for record in records {
            let start = week_start_of(record.date);
            buckets
                .entry(start)
                .or_insert_with(|| WeeklySummary::starting(start))
                .accumulate(record);
        }
        buckets.into_values().rev().collect()
    }

    pub fn build_report(records: &[DailyRecord], range: DateRange) -> PeriodReport {
        let filtered = Self::filter_by_range(records, range.start, range.end);
        let weeks = Self::group_by_week(&filtered);
        tracing::debug!(
            start = %range.start,
            end = %range.end,
            records = filtered.len(),
            weeks = weeks.len(),
            "built period report"
        );
        PeriodReport {
            range,
            total_value: Self::total_value(&filtered),
            total_quantity: Self::total_quantity(&filtered),
            records: filtered,
            weeks,
        }
    }
}
