use crate::core::errors::Result;
use crate::domain::{DailyRecord, RecordDraft};
use crate::storage::{KeyValueStore, RecordStore};

pub struct RecordService;

impl RecordService {
    /// Validates the draft, values it at `rate`, and persists the new record.
    /// The draft is reset (date kept) only when the save succeeds.
    pub fn register<S: KeyValueStore>(
        store: &RecordStore<S>,
        draft: &mut RecordDraft,
        rate: f64,
    ) -> Result<DailyRecord> {
        let record = draft.build(rate)?;
        store.add(record.clone())?;
        draft.reset();
        Ok(record)
    }

    /// History search: a record matches when its ISO date or its quantity contains
    /// `term`. Results are newest first.
    pub fn search(records: &[DailyRecord], term: &str) -> Vec<DailyRecord> {
        let term = term.trim();
        let mut matches: Vec<DailyRecord> = records
            .iter()
            .filter(|record| {
                term.is_empty()
                    || record.date.to_string().contains(term)
                    || record.quantity.to_string().contains(term)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::WorklogError;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn register_persists_and_resets_draft() {
        let store = RecordStore::new(MemoryStore::new());
        let mut draft = RecordDraft::new(date(2024, 1, 8));
        draft.quantity = Some(10);
        draft.attach("data:image/png;base64,AA==".into());

        let record = RecordService::register(&store, &mut draft, 5.0).unwrap();
        assert_eq!(record.total_value, 50.0);
        assert_eq!(store.list(), vec![record]);
        assert_eq!(draft.quantity, None);
        assert!(draft.photos.is_empty());
        assert_eq!(draft.date, date(2024, 1, 8));
    }

    #[test]
    fn register_refuses_incomplete_draft() {
        let store = RecordStore::new(MemoryStore::new());
        let mut draft = RecordDraft::new(date(2024, 1, 8));
        let err = RecordService::register(&store, &mut draft, 5.0).unwrap_err();
        assert!(matches!(err, WorklogError::Validation(_)));
        assert!(store.list().is_empty());
    }

    #[test]
    fn stored_totals_ignore_later_rate_changes() {
        let store = RecordStore::new(MemoryStore::new());
        let mut draft = RecordDraft::new(date(2024, 1, 8));
        draft.quantity = Some(4);
        RecordService::register(&store, &mut draft, 5.0).unwrap();
        draft.quantity = Some(4);
        RecordService::register(&store, &mut draft, 7.5).unwrap();

        let totals: Vec<f64> = store.list().iter().map(|r| r.total_value).collect();
        assert_eq!(totals, vec![30.0, 20.0]);
    }

    #[test]
    fn search_matches_date_or_quantity_newest_first() {
        let records = vec![
            DailyRecord::new(date(2024, 1, 5), 12, 5.0, Vec::new()),
            DailyRecord::new(date(2024, 2, 7), 30, 5.0, Vec::new()),
            DailyRecord::new(date(2024, 1, 20), 8, 5.0, Vec::new()),
        ];

        let january: Vec<NaiveDate> = RecordService::search(&records, "2024-01")
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(january, vec![date(2024, 1, 20), date(2024, 1, 5)]);

        let by_quantity = RecordService::search(&records, "12");
        assert_eq!(by_quantity.len(), 1);
        assert_eq!(by_quantity[0].quantity, 12);

        let everything: Vec<NaiveDate> = RecordService::search(&records, "")
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(everything, vec![date(2024, 2, 7), date(2024, 1, 20), date(2024, 1, 5)]);

        assert!(RecordService::search(&records, "1999").is_empty());
    }
}
