#![doc(test(attr(deny(warnings))))]

//! Worklog Core records daily piecework quantities, values them at a
//! configurable per-unit rate, and reports totals and weekly summaries over a
//! date range. The `worklog_cli` binary exposes the same operations as a shell.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Worklog Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
