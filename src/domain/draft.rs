//! The record being composed before it is saved.

use chrono::NaiveDate;

use super::record::DailyRecord;
use super::valuation;
use crate::core::errors::{Result, WorklogError};

/// Pending entry: date, quantity, and attached photos. Becomes a [`DailyRecord`]
/// only once the quantity is positive.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub date: NaiveDate,
    pub quantity: Option<u32>,
    pub photos: Vec<String>,
}

impl RecordDraft {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            quantity: None,
            photos: Vec::new(),
        }
    }

    /// Live value preview; zero while no quantity is set.
    pub fn preview_total(&self, rate: f64) -> f64 {
        self.quantity
            .map(|quantity| valuation::value(quantity, rate))
            .unwrap_or(0.0)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.quantity, Some(quantity) if quantity > 0)
    }

    pub fn attach(&mut self, payload: String) {
        self.photos.push(payload);
    }

    pub fn detach(&mut self, index: usize) -> Result<String> {
        if index >= self.photos.len() {
            return Err(WorklogError::InvalidInput(format!(
                "photo {} does not exist (draft has {})",
                index + 1,
                self.photos.len()
            )));
        }
        Ok(self.photos.remove(index))
    }

    pub fn build(&self, rate: f64) -> Result<DailyRecord> {
        match self.quantity {
            Some(quantity) if quantity > 0 => Ok(DailyRecord::new(
                self.date,
                quantity,
                rate,
                self.photos.clone(),
            )),
            _ => Err(WorklogError::Validation(
                "quantity must be greater than zero".into(),
            )),
        }
    }

    /// Clears quantity and photos after a save; the date is kept for the next entry.
    pub fn reset(&mut self) {
        self.quantity = None;
        self.photos.clear();
    }
}
