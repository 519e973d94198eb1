//! Staffing model definitions.
//!
//! A staffing model is a named daily day/night shift target, annualized for
//! comparison against a roster's totals.

use serde::{Deserialize, Serialize};

/// Days used to annualize daily staffing targets.
pub const DAYS_PER_YEAR: u64 = 365;

/// A named staffing target such as "6:2" (six day shifts and two night
/// shifts every day of the year).
///
/// # Example
///
/// ```
/// use coverage_engine::models::StaffingModel;
///
/// let model = StaffingModel::new("6:2", 6, 2);
/// assert_eq!(model.annual_day_target(), 2190);
/// assert_eq!(model.annual_night_target(), 730);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingModel {
    /// Identifier shown to users (e.g. "8:3").
    pub label: String,
    /// Day shifts required per day.
    pub daily_day_rate: u32,
    /// Night shifts required per day.
    pub daily_night_rate: u32,
}

impl StaffingModel {
    /// Creates a staffing model.
    pub fn new(label: impl Into<String>, daily_day_rate: u32, daily_night_rate: u32) -> Self {
        Self {
            label: label.into(),
            daily_day_rate,
            daily_night_rate,
        }
    }

    /// Day shifts needed over a year.
    pub fn annual_day_target(&self) -> u64 {
        u64::from(self.daily_day_rate) * DAYS_PER_YEAR
    }

    /// Night shifts needed over a year.
    pub fn annual_night_target(&self) -> u64 {
        u64::from(self.daily_night_rate) * DAYS_PER_YEAR
    }
}
