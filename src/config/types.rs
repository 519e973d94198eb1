//! Configuration types for the coverage calculator.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{BufferClass, ClinicianType, StaffingModel};

/// How fractional results are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties go to the even neighbour (22.5 -> 22, 23.5 -> 24).
    #[default]
    HalfEven,
    /// Ties go away from zero (22.5 -> 23).
    HalfUp,
}

impl RoundingMode {
    /// Returns the matching `rust_decimal` strategy.
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        }
    }
}

fn default_months_per_year() -> u32 {
    12
}

fn default_app_factor() -> Decimal {
    Decimal::new(84, 2)
}

fn default_non_app_factor() -> Decimal {
    Decimal::new(85, 2)
}

fn default_true() -> bool {
    true
}

/// Attrition buffer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSettings {
    /// Whether the buffer stage runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Multiplier applied to APP-class totals.
    #[serde(default = "default_app_factor")]
    pub app_factor: Decimal,
    /// Multiplier applied to non-APP totals.
    #[serde(default = "default_non_app_factor")]
    pub non_app_factor: Decimal,
    /// Whether "Other (Per Month)" groups are buffered as APP-class.
    #[serde(default = "default_true")]
    pub other_per_month_as_app: bool,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            app_factor: default_app_factor(),
            non_app_factor: default_non_app_factor(),
            other_per_month_as_app: true,
        }
    }
}

impl BufferSettings {
    /// Returns the buffer class a clinician type is reduced by.
    ///
    /// # Example
    ///
    /// ```
    /// use coverage_engine::config::BufferSettings;
    /// use coverage_engine::models::{BufferClass, ClinicianType};
    ///
    /// let settings = BufferSettings::default();
    /// assert_eq!(settings.class_of(ClinicianType::AppNightOnly), BufferClass::App);
    /// assert_eq!(settings.class_of(ClinicianType::Madigan), BufferClass::NonApp);
    /// ```
    pub fn class_of(&self, clinician_type: ClinicianType) -> BufferClass {
        let app = clinician_type.is_app()
            || (self.other_per_month_as_app && clinician_type == ClinicianType::OtherPerMonth);

        if app {
            BufferClass::App
        } else {
            BufferClass::NonApp
        }
    }

    /// Returns the multiplier for a buffer class.
    pub fn factor(&self, class: BufferClass) -> Decimal {
        match class {
            BufferClass::App => self.app_factor,
            BufferClass::NonApp => self.non_app_factor,
        }
    }
}

/// Calculator settings from calculator.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Months used to scale monthly APP and custom rates to a year.
    #[serde(default = "default_months_per_year")]
    pub months_per_year: u32,
    /// Rounding applied to buffered totals and coverage percentages.
    #[serde(default)]
    pub rounding: RoundingMode,
    /// Attrition buffer settings.
    #[serde(default)]
    pub buffer: BufferSettings,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            months_per_year: default_months_per_year(),
            rounding: RoundingMode::default(),
            buffer: BufferSettings::default(),
        }
    }
}

/// Staffing models configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Staffing models in display order.
    pub models: Vec<StaffingModel>,
}

/// The complete calculator configuration.
#[derive(Debug, Clone)]
pub struct CoverageConfig {
    settings: CalculatorSettings,
    models: Vec<StaffingModel>,
}

impl CoverageConfig {
    /// Creates a CoverageConfig from its component parts.
    ///
    /// Validation happens in [`super::ConfigLoader`].
    pub(crate) fn new(settings: CalculatorSettings, models: Vec<StaffingModel>) -> Self {
        Self { settings, models }
    }

    /// Returns the calculator settings.
    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Returns the staffing models in configuration order.
    pub fn models(&self) -> &[StaffingModel] {
        &self.models
    }
}
