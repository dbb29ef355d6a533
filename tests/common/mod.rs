#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;
use worklog_core::{
    config::ConfigManager,
    domain::DailyRecord,
    storage::{FileStore, RecordStore},
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated record store and config manager rooted in a unique directory.
pub fn setup_test_env() -> (RecordStore<FileStore>, ConfigManager, PathBuf) {
    let base = temp_home();
    let backend = FileStore::new(Some(base.clone()), Some(3)).expect("create file store");
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (RecordStore::new(backend), config_manager, base)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn record(year: i32, month: u32, day: u32, quantity: u32) -> DailyRecord {
    DailyRecord::new(date(year, month, day), quantity, 5.0, Vec::new())
}
