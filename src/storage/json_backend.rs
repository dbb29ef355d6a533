use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::{
    errors::WorklogError,
    utils::{canonical_name, ensure_dir, PathResolver},
};

use super::{KeyValueStore, Result};

const VALUE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Describes a timestamped copy of a previously stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub key: String,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

/// Filesystem-backed key-value store: one JSON file per key, staged writes,
/// and a rolling set of backups taken before each overwrite.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    store_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl FileStore {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        let store_dir = PathResolver::store_dir_in(&root);
        let backups_dir = PathResolver::backup_dir_in(&root);
        ensure_dir(&store_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            root,
            store_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.store_dir
            .join(format!("{}.{}", canonical_name(key), VALUE_EXTENSION))
    }

    fn backup_dir(&self, key: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(key))
    }

    /// Lists the backups taken for `key`, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            entries.push(BackupInfo {
                key: canonical_name(key),
                name: name.to_string(),
                created_at: parse_backup_timestamp(name),
                path: path.clone(),
            });
        }
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(entries)
    }

    /// Copies the named backup over the live value of `key` and returns the restored content.
    pub fn restore(&self, key: &str, backup_name: &str) -> Result<String> {
        let backup_path = self.backup_dir(key).join(backup_name);
        if backup_name.contains(['/', '\\']) || !backup_path.is_file() {
            return Err(WorklogError::StorageError(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let data = fs::read_to_string(&backup_path)?;
        self.set(key, &data)?;
        tracing::info!(key, backup = backup_name, "restored backup");
        Ok(data)
    }

    fn backup_existing_file(&self, key: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(key);
        ensure_dir(&dir)?;
        let mut stamp = Utc::now();
        let mut backup_name = backup_file_name(key, stamp);
        // Names must stay unique so a backup is never overwritten.
        while dir.join(&backup_name).exists() {
            stamp += Duration::microseconds(1);
            backup_name = backup_file_name(key, stamp);
        }
        fs::copy(path, dir.join(&backup_name))?;
        tracing::debug!(key, backup = %backup_name, "backed up previous value");
        self.prune_backups(key)
    }

    fn prune_backups(&self, key: &str) -> Result<()> {
        let backups = self.list_backups(key)?;
        for stale in backups.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&stale.path) {
                tracing::warn!(path = %stale.path.display(), %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        tracing::debug!(key, bytes = data.len(), "read value");
        Ok(Some(data))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        self.backup_existing_file(key, &path)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, bytes = value.len(), "wrote value");
        Ok(())
    }
}

fn backup_file_name(key: &str, stamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        canonical_name(key),
        stamp.format(BACKUP_TIMESTAMP_FORMAT),
        VALUE_EXTENSION
    )
}

/// Reads `<key>_YYYYMMDD_HHMMSS_ffffff.json`; names without the microsecond
/// part are accepted too.
fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{}", VALUE_EXTENSION))?;
    let parts: Vec<&str> = stem.split('_').collect();
    let (date_part, time_part, micros) = match parts.as_slice() {
        [.., date, time, fraction]
            if is_digits(date, 8) && is_digits(time, 6) && is_digits(fraction, 6) =>
        {
            (*date, *time, fraction.parse::<i64>().ok()?)
        }
        [_, .., date, time] if is_digits(date, 8) && is_digits(time, 6) => (*date, *time, 0),
        _ => return None,
    };
    NaiveDateTime::parse_from_str(&format!("{date_part}{time_part}"), "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| {
            DateTime::from_naive_utc_and_offset(naive, Utc) + Duration::microseconds(micros)
        })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
