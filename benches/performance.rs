use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;
use worklog_core::{
    core::services::ReportService,
    domain::{DailyRecord, DateRange},
    storage::{FileStore, RecordStore},
};

fn build_sample_records(count: usize) -> Vec<DailyRecord> {
    let start_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 1_500) as i64);
            DailyRecord::new(date, 1 + (idx % 40) as u32, 5.0, Vec::new())
        })
        .collect()
}

fn bench_reporting(c: &mut Criterion) {
    let records = build_sample_records(black_box(10_000));
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
    )
    .unwrap();

    c.bench_function("group_by_week_10k", |b| {
        b.iter(|| black_box(ReportService::group_by_week(&records)))
    });

    c.bench_function("build_report_10k", |b| {
        b.iter(|| black_box(ReportService::build_report(&records, range)))
    });
}

fn bench_store_io(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let backend = FileStore::new(Some(dir.path().to_path_buf()), Some(2)).expect("file store");
    let store = RecordStore::new(backend);
    for record in build_sample_records(1_000) {
        store.add(record).expect("seed");
    }

    c.bench_function("store_list_1k", |b| b.iter(|| black_box(store.list())));

    let extra = build_sample_records(1).remove(0);
    c.bench_function("store_add_remove_1k", |b| {
        b.iter(|| {
            store.add(extra.clone()).expect("add");
            store.remove(&extra.id).expect("remove");
        })
    });
}

criterion_group!(benches, bench_reporting, bench_store_io);
criterion_main!(benches);
