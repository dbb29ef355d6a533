use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::core::time::Clock;

/// Real-time clock. Days follow the local calendar since records are logged by local date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
