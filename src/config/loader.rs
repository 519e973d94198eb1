//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading calculator
//! settings and staffing models from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::StaffingModel;

use super::types::{CalculatorSettings, CoverageConfig, ModelsConfig};

/// Loads, validates and provides access to calculator configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── calculator.yaml  # Months per year, rounding, attrition buffer
/// └── models.yaml      # Staffing models in display order
/// ```
///
/// Every problem with the configuration is reported here, at load time, so
/// requests never observe a malformed staffing model.
///
/// # Example
///
/// ```no_run
/// use coverage_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// for model in loader.models() {
///     println!("{}: {} days / {} nights per day", model.label, model.daily_day_rate, model.daily_night_rate);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CoverageConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A setting or staffing model fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<CalculatorSettings>(&path.join("calculator.yaml"))?;
        let models = Self::load_yaml::<ModelsConfig>(&path.join("models.yaml"))?.models;

        let loader = Self::from_parts(settings, models)?;
        debug!(
            path = %path.display(),
            models = loader.models().len(),
            months_per_year = loader.settings().months_per_year,
            buffer_enabled = loader.settings().buffer.enabled,
            "Loaded coverage configuration"
        );
        Ok(loader)
    }

    /// Builds a loader from settings and models already in memory.
    ///
    /// Applies the same validation as [`ConfigLoader::load`].
    ///
    /// # Example
    ///
    /// ```
    /// use coverage_engine::config::{CalculatorSettings, ConfigLoader};
    /// use coverage_engine::models::StaffingModel;
    ///
    /// let loader = ConfigLoader::from_parts(
    ///     CalculatorSettings::default(),
    ///     vec![StaffingModel::new("6:2", 6, 2), StaffingModel::new("8:3", 8, 3)],
    /// )?;
    /// assert_eq!(loader.models().len(), 2);
    /// # Ok::<(), coverage_engine::error::EngineError>(())
    /// ```
    pub fn from_parts(
        settings: CalculatorSettings,
        models: Vec<StaffingModel>,
    ) -> EngineResult<Self> {
        Self::validate_settings(&settings)?;
        Self::validate_models(&models)?;

        Ok(Self {
            config: CoverageConfig::new(settings, models),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_settings(settings: &CalculatorSettings) -> EngineResult<()> {
        if settings.months_per_year == 0 {
            return Err(EngineError::InvalidSettings {
                field: "months_per_year".to_string(),
                message: "must be positive".to_string(),
            });
        }

        let factors = [
            ("buffer.app_factor", settings.buffer.app_factor),
            ("buffer.non_app_factor", settings.buffer.non_app_factor),
        ];
        for (field, factor) in factors {
            if factor <= Decimal::ZERO || factor > Decimal::ONE {
                return Err(EngineError::InvalidSettings {
                    field: field.to_string(),
                    message: format!("must be greater than 0 and at most 1, got {}", factor),
                });
            }
        }

        Ok(())
    }

    fn validate_models(models: &[StaffingModel]) -> EngineResult<()> {
        if models.is_empty() {
            return Err(EngineError::InvalidModel {
                label: String::new(),
                message: "at least one staffing model must be configured".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for model in models {
            let invalid = |message: &str| EngineError::InvalidModel {
                label: model.label.clone(),
                message: message.to_string(),
            };

            if model.label.trim().is_empty() {
                return Err(invalid("label must not be empty"));
            }
            if model.daily_day_rate == 0 {
                return Err(invalid("daily_day_rate must be positive"));
            }
            if model.daily_night_rate == 0 {
                return Err(invalid("daily_night_rate must be positive"));
            }
            if !seen.insert(model.label.as_str()) {
                return Err(invalid("label is defined more than once"));
            }
        }

        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Returns the calculator settings.
    pub fn settings(&self) -> &CalculatorSettings {
        self.config.settings()
    }

    /// Returns the staffing models in configuration order.
    pub fn models(&self) -> &[StaffingModel] {
        self.config.models()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingMode;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn default_models() -> Vec<StaffingModel> {
        vec![
            StaffingModel::new("6:2", 6, 2),
            StaffingModel::new("8:3", 8, 3),
        ]
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().months_per_year, 12);
        assert_eq!(loader.settings().rounding, RoundingMode::HalfEven);
        assert!(loader.settings().buffer.enabled);
    }

    #[test]
    fn test_models_loaded_in_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let labels: Vec<_> = loader.models().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["6:2", "6:3", "7:2", "7:3", "8:2", "8:3"]);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("calculator.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_rate_model_is_rejected() {
        let models = vec![StaffingModel::new("6:0", 6, 0)];
        let result = ConfigLoader::from_parts(CalculatorSettings::default(), models);

        match result {
            Err(EngineError::InvalidModel { label, message }) => {
                assert_eq!(label, "6:0");
                assert!(message.contains("daily_night_rate"));
            }
            other => panic!("Expected InvalidModel error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_labels_are_rejected() {
        let models = vec![
            StaffingModel::new("6:2", 6, 2),
            StaffingModel::new("6:2", 6, 2),
        ];
        let result = ConfigLoader::from_parts(CalculatorSettings::default(), models);
        assert!(matches!(result, Err(EngineError::InvalidModel { .. })));
    }

    #[test]
    fn test_empty_model_list_is_rejected() {
        let result = ConfigLoader::from_parts(CalculatorSettings::default(), vec![]);
        assert!(matches!(result, Err(EngineError::InvalidModel { .. })));
    }

    #[test]
    fn test_buffer_factor_out_of_range_is_rejected() {
        let mut settings = CalculatorSettings::default();
        settings.buffer.app_factor = Decimal::new(15, 1);

        match ConfigLoader::from_parts(settings, default_models()) {
            Err(EngineError::InvalidSettings { field, .. }) => {
                assert_eq!(field, "buffer.app_factor");
            }
            other => panic!("Expected InvalidSettings error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_months_per_year_is_rejected() {
        let settings = CalculatorSettings {
            months_per_year: 0,
            ..CalculatorSettings::default()
        };

        let result = ConfigLoader::from_parts(settings, default_models());
        assert!(matches!(result, Err(EngineError::InvalidSettings { .. })));
    }

    #[test]
    fn test_thirteen_month_variant_is_accepted() {
        let settings = CalculatorSettings {
            months_per_year: 13,
            ..CalculatorSettings::default()
        };

        let loader = ConfigLoader::from_parts(settings, default_models()).unwrap();
        assert_eq!(loader.settings().months_per_year, 13);
    }
}
