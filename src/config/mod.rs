//! Organization identity and formatting preferences, persisted as JSON.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MAX_INPUT_VALUE;

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const APP_DIR_NAME: &str = "expense_core";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Identity block printed on invoices and expense reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    /// One-line description printed under the expense report title.
    pub description: String,
    #[serde(default)]
    pub address_lines: Vec<String>,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            name: "Sentiers Frontaliers Inc.".into(),
            description: "Association de sentier pédestre".into(),
            address_lines: vec![
                "Case postale 23".into(),
                "Lac-Mégantic, QC G6B 2S5".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub organization: Organization,
    #[serde(default = "Config::default_currency_suffix")]
    pub currency_suffix: String,
    #[serde(default = "Config::default_invoice_currency")]
    pub invoice_currency: String,
    /// Amount reimbursed per kilometre.
    #[serde(default = "Config::default_mileage_rate")]
    pub mileage_rate: Decimal,
    /// `strftime` pattern used for every printed date.
    #[serde(default = "Config::default_date_format")]
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organization: Organization::default(),
            currency_suffix: Self::default_currency_suffix(),
            invoice_currency: Self::default_invoice_currency(),
            mileage_rate: Self::default_mileage_rate(),
            date_format: Self::default_date_format(),
        }
    }
}

impl Config {
    pub fn default_currency_suffix() -> String {
        "$".into()
    }

    pub fn default_invoice_currency() -> String {
        "CAD".into()
    }

    pub fn default_mileage_rate() -> Decimal {
        Decimal::new(25, 2)
    }

    pub fn default_date_format() -> String {
        "%Y-%m-%d".into()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mileage_rate < Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "mileage rate must not be negative (got {})",
                self.mileage_rate
            )));
        }
        if self.mileage_rate > MAX_INPUT_VALUE {
            return Err(ConfigError::Invalid(format!(
                "mileage rate must not exceed {MAX_INPUT_VALUE} (got {})",
                self.mileage_rate
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("date format must not be empty".into()));
        }
        Ok(())
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_json::from_str(data).map_err(|err| ConfigError::Serde(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads and saves a [`Config`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Uses `<base>/config/config.json`, creating the directory if needed.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join(CONFIG_FILE)))
    }

    /// Uses the platform configuration directory, falling back to the
    /// current directory when none is known.
    pub fn platform_default() -> Result<Self, ConfigError> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);
        Self::with_base_dir(base)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the config, or returns the defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            Config::from_json(&data)
        } else {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
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

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = Config::from_json(r#"{ "mileage_rate": "0.40" }"#).unwrap();
        assert_eq!(config.mileage_rate, Decimal::new(40, 2));
        assert_eq!(config.currency_suffix, "$");
        assert_eq!(config.organization, Organization::default());
    }

    #[test]
    fn negative_mileage_rate_is_rejected() {
        let err = Config::from_json(r#"{ "mileage_rate": "-1" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn oversized_mileage_rate_is_rejected() {
        let err = Config::from_json(r#"{ "mileage_rate": "1000000001" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/x/config.json"));
        assert_eq!(tmp, PathBuf::from("/x/config.json.tmp"));
    }
}
