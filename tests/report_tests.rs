mod common;

use common::{date, record};
use worklog_core::{
    core::services::{RecordService, ReportService},
    domain::{value, DateRange, DailyRecord, RecordDraft},
    storage::{MemoryStore, RecordStore},
};

fn january() -> Vec<DailyRecord> {
    vec![
        record(2024, 1, 14, 20),
        record(2024, 2, 1, 7),
        record(2024, 1, 8, 10),
        record(2024, 1, 3, 4),
        record(2023, 12, 31, 1),
    ]
}

#[test]
fn week_of_monday_and_sunday_forms_one_bucket() {
    let records = vec![record(2024, 1, 8, 10), record(2024, 1, 14, 20)];
    let weeks = ReportService::group_by_week(&records);

    assert_eq!(weeks.len(), 1);
    let week = &weeks[0];
    assert_eq!(week.week_start, date(2024, 1, 8));
    assert_eq!(week.week_end, date(2024, 1, 14));
    assert_eq!(week.total_quantity, 30);
    assert_eq!(week.total_value, 150.0);
    assert_eq!(week.count, 2);
}

#[test]
fn january_report_excludes_february() {
    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
    let report = ReportService::build_report(&january(), range);

    let dates: Vec<_> = report.records.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 1, 3), date(2024, 1, 8), date(2024, 1, 14)]
    );
    assert_eq!(report.total_quantity, 34);
    assert_eq!(report.total_value, 170.0);
    assert_eq!(report.average_value(), 170.0 / 3.0);

    let starts: Vec<_> = report.weeks.iter().map(|w| w.week_start).collect();
    assert_eq!(starts, vec![date(2024, 1, 8), date(2024, 1, 1)]);
}

#[test]
fn weekly_buckets_partition_the_input() {
    let records = january();
    let weeks = ReportService::group_by_week(&records);

    let counted: usize = weeks.iter().map(|w| w.count).sum();
    assert_eq!(counted, records.len());
    for record in &records {
        let holders = weeks.iter().filter(|w| w.contains(record.date)).count();
        assert_eq!(holders, 1, "{} must fall in exactly one week", record.date);
    }
    assert!(weeks.iter().all(|w| w.count > 0));
}

#[test]
fn sunday_before_the_new_year_belongs_to_the_previous_week() {
    let weeks = ReportService::group_by_week(&[record(2023, 12, 31, 1)]);
    assert_eq!(weeks[0].week_start, date(2023, 12, 25));
}

#[test]
fn stored_totals_ignore_later_rate_changes() {
    let store = RecordStore::new(MemoryStore::new());
    let mut draft = RecordDraft::new(date(2024, 1, 10));
    draft.quantity = Some(4);
    RecordService::register(&store, &mut draft, 5.0).unwrap();

    draft.quantity = Some(4);
    RecordService::register(&store, &mut draft, 7.5).unwrap();

    let totals: Vec<f64> = store.list().iter().map(|r| r.total_value).collect();
    assert_eq!(totals, vec![value(4, 7.5), value(4, 5.0)]);
}

#[test]
fn search_matches_dates_and_quantities_newest_first() {
    let records = january();
    let by_month = RecordService::search(&records, "2024-01");
    let dates: Vec<_> = by_month.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 1, 14), date(2024, 1, 8), date(2024, 1, 3)]
    );

    let by_quantity = RecordService::search(&records, "20");
    assert!(by_quantity.iter().any(|r| r.quantity == 20));
    assert_eq!(RecordService::search(&records, "").len(), records.len());
}
