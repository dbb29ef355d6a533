//! The persisted daily work record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Identifiable;
use super::valuation;

/// One day's logged work. Immutable once created: the total is fixed at creation
/// time so later rate changes never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub id: String,
    pub date: NaiveDate,
    pub quantity: u32,
    pub total_value: f64,
    /// Inline image payloads (`data:` URLs).
    #[serde(default)]
    pub photos: Vec<String>,
}

impl DailyRecord {
    /// Creates a record with a fresh identifier, valuing `quantity` at `rate`.
    pub fn new(date: NaiveDate, quantity: u32, rate: f64, photos: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            quantity,
            total_value: valuation::value(quantity, rate),
            photos,
        }
    }

    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }

    /// First eight characters of the identifier, enough to address a record in the shell.
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(idx, _)| idx)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}

impl Identifiable for DailyRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_record_stores_computed_total() {
        let record = DailyRecord::new(date(2024, 1, 8), 10, 5.0, Vec::new());
        assert_eq!(record.total_value, 50.0);
        assert!(!record.has_photos());
        assert_eq!(record.short_id().len(), 8);
    }

    #[test]
    fn identifiers_are_unique() {
        let a = DailyRecord::new(date(2024, 1, 8), 1, 5.0, Vec::new());
        let b = DailyRecord::new(date(2024, 1, 8), 1, 5.0, Vec::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let record = DailyRecord::new(date(2024, 1, 8), 3, 2.5, vec!["data:image/png;base64,AA==".into()]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-01-08");
        assert_eq!(json["totalValue"], 7.5);
        assert_eq!(json["photos"][0], "data:image/png;base64,AA==");
    }

    #[test]
    fn reads_records_written_without_photos() {
        let raw = r#"{"id":"abc","date":"2024-05-02","quantity":4,"totalValue":20}"#;
        let record: DailyRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.quantity, 4);
        assert_eq!(record.total_value, 20.0);
        assert!(record.photos.is_empty());
        assert_eq!(record.short_id(), "abc");
    }
}
