//! User settings for fintrack
//!
//! Stores the profile owner and display preferences.

use serde::{Deserialize, Serialize};

use super::paths::FintrackPaths;
use crate::error::FinanceError;
use crate::models::UserId;

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Owner of every record in this data directory
    #[serde(default)]
    pub user_id: UserId,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many transactions the dashboard lists
    #[serde(default = "default_recent_limit")]
    pub recent_transactions_limit: usize,

    /// Months shown in the dashboard and trend series
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,

    /// Spent percentage at which a budget is flagged
    #[serde(default = "default_warning_percent")]
    pub budget_warning_percent: f64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_limit() -> usize {
    5
}

fn default_trend_months() -> usize {
    6
}

fn default_warning_percent() -> f64 {
    crate::analytics::DEFAULT_WARNING_PERCENT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: UserId::new(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_transactions_limit: default_recent_limit(),
            trend_months: default_trend_months(),
            budget_warning_percent: default_warning_percent(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FintrackPaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinanceError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinanceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the reports cannot work with
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.trend_months == 0 || self.trend_months > 120 {
            return Err(FinanceError::Config(format!(
                "trend_months must be between 1 and 120, got {}",
                self.trend_months
            )));
        }
        if !(0.0..=100.0).contains(&self.budget_warning_percent) {
            return Err(FinanceError::Config(format!(
                "budget_warning_percent must be between 0 and 100, got {}",
                self.budget_warning_percent
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.recent_transactions_limit, 5);
        assert_eq!(settings.trend_months, 6);
        assert_eq!(settings.budget_warning_percent, 80.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.trend_months = 12;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.user_id, settings.user_id);
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.trend_months, 12);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.recent_transactions_limit, 5);
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"trend_months": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinanceError::Config(_)));
    }
}
