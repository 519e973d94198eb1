//! Staffing model comparison.
//!
//! Compares roster totals against each configured staffing model and reports
//! the percentage of annual day and night shifts covered.

use rust_decimal::Decimal;

use crate::config::RoundingMode;
use crate::error::{EngineError, EngineResult};
use crate::models::{CoverageResult, ShiftTotals, StaffingModel};

/// Decimal places kept in coverage percentages.
pub const PERCENT_DECIMAL_PLACES: u32 = 1;

/// Returns `covered / needed x 100` rounded to one decimal place.
///
/// # Examples
///
/// ```
/// use coverage_engine::calculation::coverage_percent;
/// use coverage_engine::config::RoundingMode;
/// use rust_decimal::Decimal;
///
/// assert_eq!(coverage_percent(15, 730, RoundingMode::HalfEven), Some(Decimal::new(21, 1)));
/// assert_eq!(coverage_percent(15, 0, RoundingMode::HalfEven), None);
/// ```
pub fn coverage_percent(covered: u64, needed: u64, rounding: RoundingMode) -> Option<Decimal> {
    if needed == 0 {
        return None;
    }

    let mut pct = (Decimal::from(covered) * Decimal::ONE_HUNDRED)
        .checked_div(Decimal::from(needed))?
        .round_dp_with_strategy(PERCENT_DECIMAL_PLACES, rounding.strategy());
    pct.rescale(PERCENT_DECIMAL_PLACES);
    Some(pct)
}

/// Compares totals against each staffing model.
///
/// Returns one [`CoverageResult`] per model, in the order the models were
/// given. A model with a zero daily rate yields `InvalidModel`.
///
/// # Examples
///
/// ```
/// use coverage_engine::calculation::compare_models;
/// use coverage_engine::config::RoundingMode;
/// use coverage_engine::models::{ShiftTotals, StaffingModel};
/// use rust_decimal::Decimal;
///
/// let models = vec![StaffingModel::new("6:2", 6, 2)];
/// let results = compare_models(ShiftTotals::new(22, 15), &models, RoundingMode::HalfEven)?;
///
/// assert_eq!(results[0].day_needed, 2190);
/// assert_eq!(results[0].pct_days_covered, Decimal::new(10, 1));
/// assert_eq!(results[0].pct_nights_covered, Decimal::new(21, 1));
/// # Ok::<(), coverage_engine::error::EngineError>(())
/// ```
pub fn compare_models(
    totals: ShiftTotals,
    models: &[StaffingModel],
    rounding: RoundingMode,
) -> EngineResult<Vec<CoverageResult>> {
    models
        .iter()
        .map(|model| {
            let day_needed = model.annual_day_target();
            let night_needed = model.annual_night_target();

            let zero_rate = |field: &str| EngineError::InvalidModel {
                label: model.label.clone(),
                message: format!("{} must be positive", field),
            };

            let pct_days_covered = coverage_percent(totals.day, day_needed, rounding)
                .ok_or_else(|| zero_rate("daily_day_rate"))?;
            let pct_nights_covered = coverage_percent(totals.night, night_needed, rounding)
                .ok_or_else(|| zero_rate("daily_night_rate"))?;

            Ok(CoverageResult {
                model: model.label.clone(),
                day_needed,
                night_needed,
                day_covered: totals.day,
                night_covered: totals.night,
                pct_days_covered,
                pct_nights_covered,
            })
        })
        .collect()
}
