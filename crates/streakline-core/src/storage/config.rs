//! TOML-based application configuration.
//!
//! Stores the analysis preferences:
//! - UTC offset used to turn timestamps into local day keys
//! - Window lengths for the heatmap, trend, consistency and focus reports
//!
//! Configuration is stored at `<data dir>/config.toml`.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::stats::{DEFAULT_HEATMAP_DAYS, DEFAULT_TREND_DAYS};
use crate::time::{offset_from_minutes, system_offset, DayContext, MAX_WINDOW_DAYS};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Minutes east of UTC. Unset means the host's local offset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    #[serde(default = "default_heatmap_days")]
    pub heatmap_days: u32,
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,
    /// Window for per-habit and overall consistency rates.
    #[serde(default = "default_consistency_days")]
    pub consistency_days: u32,
    /// Trailing days shown by the per-day focus breakdown.
    #[serde(default = "default_focus_days")]
    pub focus_days: u32,
}

fn default_heatmap_days() -> u32 {
    DEFAULT_HEATMAP_DAYS
}
fn default_trend_days() -> u32 {
    DEFAULT_TREND_DAYS
}
fn default_consistency_days() -> u32 {
    30
}
fn default_focus_days() -> u32 {
    7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_minutes: None,
            heatmap_days: default_heatmap_days(),
            trend_days: default_trend_days(),
            consistency_days: default_consistency_days(),
            focus_days: default_focus_days(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                // "none" clears an optional number
                serde_json::Value::Number(_) | serde_json::Value::Null => {
                    let trimmed = value.trim();
                    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                        serde_json::Value::Null
                    } else {
                        let n = trimmed
                            .parse::<i64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(n.into())
                    }
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// `<data dir>/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default path, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. The caller decides when to [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let next: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Every top-level key with its current value, in declaration order.
    pub fn entries(&self) -> Vec<(String, String)> {
        ["utc_offset_minutes", "heatmap_days", "trend_days", "consistency_days", "focus_days"]
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(minutes) = self.utc_offset_minutes {
            offset_from_minutes(minutes).map_err(|e| ConfigError::InvalidValue {
                key: "utc_offset_minutes".into(),
                message: e.to_string(),
            })?;
        }
        for (key, days) in [
            ("heatmap_days", self.heatmap_days),
            ("trend_days", self.trend_days),
            ("consistency_days", self.consistency_days),
            ("focus_days", self.focus_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("at most {MAX_WINDOW_DAYS} days"),
                });
            }
        }
        Ok(())
    }

    /// Configured offset, or the host's local offset when unset.
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .and_then(|minutes| offset_from_minutes(minutes).ok())
            .unwrap_or_else(system_offset)
    }

    /// "Today" in the configured offset, captured now.
    pub fn day_context(&self) -> DayContext {
        DayContext::now(self.offset())
    }
}
