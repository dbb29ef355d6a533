//! Pure domain models for daily work records and the summaries derived from them.
//! No I/O and no terminal interaction.

pub mod common;
pub mod draft;
pub mod record;
pub mod summary;
pub mod valuation;

pub use common::{DateRange, Identifiable};
pub use draft::RecordDraft;
pub use record::DailyRecord;
pub use summary::{PeriodReport, WeeklySummary};
pub use valuation::{value, DEFAULT_RATE_PER_UNIT};
