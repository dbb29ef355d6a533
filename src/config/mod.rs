use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::{
    errors::{Result, WorklogError},
    utils::{ensure_dir, PathResolver},
};
use crate::domain::valuation::{is_valid_rate, DEFAULT_RATE_PER_UNIT};
use crate::storage::DEFAULT_STORAGE_KEY;

const TMP_SUFFIX: &str = "tmp";

/// Persisted user preferences. Missing fields fall back to their defaults so
/// older files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rate_per_unit: f64,
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub date_format: String,
    pub report_window_days: u32,
    pub storage_key: String,
    pub backup_retention: usize,
    pub color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rate_per_unit: DEFAULT_RATE_PER_UNIT,
            currency_symbol: "R$".into(),
            decimal_separator: ',',
            date_format: "%d/%m/%Y".into(),
            report_window_days: 30,
            storage_key: DEFAULT_STORAGE_KEY.into(),
            backup_retention: 5,
            color_enabled: true,
        }
    }
}

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "rate_per_unit",
    "currency_symbol",
    "decimal_separator",
    "date_format",
    "report_window_days",
    "storage_key",
    "backup_retention",
    "color_enabled",
];

impl Config {
    /// Updates one field from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "rate_per_unit" => {
                let rate: f64 = parse_value(key, value)?;
                if !is_valid_rate(rate) {
                    return Err(WorklogError::ConfigError(
                        "rate_per_unit must be a positive number".into(),
                    ));
                }
                self.rate_per_unit = rate;
            }
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "decimal_separator" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(sep @ ('.' | ',')), None) => self.decimal_separator = sep,
                    _ => {
                        return Err(WorklogError::ConfigError(
                            "decimal_separator must be `.` or `,`".into(),
                        ))
                    }
                }
            }
            "date_format" => {
                if value.is_empty() {
                    return Err(WorklogError::ConfigError("date_format cannot be empty".into()));
                }
                self.date_format = value.to_string();
            }
            "report_window_days" => self.report_window_days = parse_value(key, value)?,
            "storage_key" => {
                if value.is_empty() {
                    return Err(WorklogError::ConfigError("storage_key cannot be empty".into()));
                }
                self.storage_key = value.to_string();
            }
            "backup_retention" => {
                let retention: usize = parse_value(key, value)?;
                self.backup_retention = retention.max(1);
            }
            "color_enabled" => self.color_enabled = parse_value(key, value)?,
            other => {
                return Err(WorklogError::ConfigError(format!(
                    "unknown setting `{}` (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rate_per_unit", self.rate_per_unit.to_string()),
            ("currency_symbol", self.currency_symbol.clone()),
            ("decimal_separator", self.decimal_separator.to_string()),
            ("date_format", self.date_format.clone()),
            ("report_window_days", self.report_window_days.to_string()),
            ("storage_key", self.storage_key.clone()),
            ("backup_retention", self.backup_retention.to_string()),
            ("color_enabled", self.color_enabled.to_string()),
        ]
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| WorklogError::ConfigError(format!("invalid value `{}` for {}", value, key)))
}

/// Loads and saves [`Config`] as JSON below the application home.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data).map_err(|err| {
            WorklogError::ConfigError(format!("{}: {}", self.path.display(), err))
        })?;
        if !is_valid_rate(config.rate_per_unit) {
            return Err(WorklogError::ConfigError(format!(
                "{}: rate_per_unit must be a positive number",
                self.path.display()
            )));
        }
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!("json.{}", TMP_SUFFIX));
    tmp
}
