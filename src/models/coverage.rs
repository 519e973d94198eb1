//! Coverage result models for the Coverage Engine.
//!
//! This module contains the [`CoverageReport`] type and its associated
//! structures that capture everything a recomputation returns for display:
//! raw and buffer-adjusted totals, one coverage row per staffing model, and
//! the current roster entries with their derived columns.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountingBasis, ClinicianType};

/// Annual day and night shift totals.
///
/// # Example
///
/// ```
/// use coverage_engine::models::ShiftTotals;
///
/// let totals = ShiftTotals::new(22, 15) + ShiftTotals::new(3, 1);
/// assert_eq!(totals, ShiftTotals::new(25, 16));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTotals {
    /// Total day shifts.
    pub day: u64,
    /// Total night shifts.
    pub night: u64,
}

impl ShiftTotals {
    /// Creates a totals pair.
    pub fn new(day: u64, night: u64) -> Self {
        Self { day, night }
    }
}

impl std::ops::Add for ShiftTotals {
    type Output = ShiftTotals;

    fn add(self, rhs: ShiftTotals) -> ShiftTotals {
        ShiftTotals {
            day: self.day + rhs.day,
            night: self.night + rhs.night,
        }
    }
}

/// Which attrition factor an entry's shifts are reduced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferClass {
    /// APP-style monthly headcount groups.
    App,
    /// Physicians, interns and fellows.
    NonApp,
}

/// Coverage of a single staffing model by the roster totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// The staffing model label.
    pub model: String,
    /// Day shifts the model needs per year.
    pub day_needed: u64,
    /// Night shifts the model needs per year.
    pub night_needed: u64,
    /// Day shifts the roster covers per year.
    pub day_covered: u64,
    /// Night shifts the roster covers per year.
    pub night_covered: u64,
    /// Percentage of day shifts covered, one decimal place.
    pub pct_days_covered: Decimal,
    /// Percentage of night shifts covered, one decimal place.
    pub pct_nights_covered: Decimal,
}

/// A roster entry as displayed in the contribution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRow {
    /// Zero-based position in the roster.
    pub position: usize,
    /// The clinician type tag.
    pub clinician_type: ClinicianType,
    /// The clinician type display label.
    pub label: String,
    /// Day shifts before buffering.
    pub day_shifts: u32,
    /// Night shifts before buffering.
    pub night_shifts: u32,
    /// The entry's accounting basis.
    pub basis: AccountingBasis,
    /// The attrition factor group the entry falls into.
    pub buffer_class: BufferClass,
}

/// The output of one recomputation over a roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Totals summed straight from the entries.
    pub raw_totals: ShiftTotals,
    /// Totals after the attrition buffer (equal to raw when disabled).
    pub adjusted_totals: ShiftTotals,
    /// Whether the attrition buffer was applied.
    pub buffer_applied: bool,
    /// One row per configured staffing model, in configuration order.
    pub coverage: Vec<CoverageResult>,
    /// The roster entries in insertion order.
    pub entries: Vec<EntryRow>,
    /// When the report was computed.
    pub calculated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_totals_default_is_zero() {
        assert_eq!(ShiftTotals::default(), ShiftTotals::new(0, 0));
    }

    #[test]
    fn test_coverage_result_serializes_percentages_as_strings() {
        let result = CoverageResult {
            model: "6:2".to_string(),
            day_needed: 2190,
            night_needed: 730,
            day_covered: 22,
            night_covered: 15,
            pct_days_covered: Decimal::from_str("1.0").unwrap(),
            pct_nights_covered: Decimal::from_str("2.1").unwrap(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pct_days_covered"], "1.0");
        assert_eq!(json["pct_nights_covered"], "2.1");
    }

    #[test]
    fn test_buffer_class_serialization() {
        assert_eq!(
            serde_json::to_string(&BufferClass::NonApp).unwrap(),
            "\"non_app\""
        );
    }
}
