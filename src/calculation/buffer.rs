//! Attrition buffer.
//!
//! Raw roster totals overstate the shifts a group will actually work once
//! PTO and sick leave are accounted for. This module partitions entries into
//! APP and non-APP classes, reduces each class by its configured factor and
//! rounds the result to whole shifts.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::{BufferSettings, RoundingMode};
use crate::error::{EngineError, EngineResult};
use crate::models::{BufferClass, ClinicianEntry, ShiftTotals};

/// Totals before and after the attrition buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferedTotals {
    /// Sum over every entry.
    pub raw: ShiftTotals,
    /// Sum over APP-class entries.
    pub app_raw: ShiftTotals,
    /// Sum over non-APP entries.
    pub non_app_raw: ShiftTotals,
    /// Totals after the buffer; equal to `raw` when the buffer is bypassed.
    pub adjusted: ShiftTotals,
    /// Whether the buffer stage ran.
    pub buffer_applied: bool,
}

/// Sums entries within each buffer class.
pub fn sum_by_class(
    entries: &[ClinicianEntry],
    settings: &BufferSettings,
) -> (ShiftTotals, ShiftTotals) {
    entries.iter().fold(
        (ShiftTotals::default(), ShiftTotals::default()),
        |(app, non_app), entry| {
            let totals = ShiftTotals::new(u64::from(entry.day_shifts), u64::from(entry.night_shifts));
            match settings.class_of(entry.clinician_type) {
                BufferClass::App => (app + totals, non_app),
                BufferClass::NonApp => (app, non_app + totals),
            }
        },
    )
}

/// Multiplies a shift count by a factor and rounds to a whole shift.
///
/// # Examples
///
/// ```
/// use coverage_engine::calculation::scale_shifts;
/// use coverage_engine::config::RoundingMode;
/// use rust_decimal::Decimal;
///
/// let factor = Decimal::new(85, 2);
/// assert_eq!(scale_shifts(26, factor, RoundingMode::HalfEven)?, 22);
/// assert_eq!(scale_shifts(18, factor, RoundingMode::HalfEven)?, 15);
/// # Ok::<(), coverage_engine::error::EngineError>(())
/// ```
pub fn scale_shifts(shifts: u64, factor: Decimal, rounding: RoundingMode) -> EngineResult<u64> {
    let scaled = Decimal::from(shifts)
        .checked_mul(factor)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("{} shifts x {} overflows", shifts, factor),
        })?
        .round_dp_with_strategy(0, rounding.strategy());

    scaled.to_u64().ok_or_else(|| EngineError::CalculationError {
        message: format!("buffered shift count {} is not a whole non-negative number", scaled),
    })
}

/// Applies the attrition buffer to a roster's entries.
///
/// When `settings.enabled` is false the buffer stage is bypassed and the
/// adjusted totals equal the raw sums.
///
/// # Arguments
///
/// * `entries` - The roster entries
/// * `settings` - Buffer factors and class assignment
/// * `rounding` - How each scaled class total is rounded
///
/// # Examples
///
/// ```
/// use coverage_engine::calculation::apply_buffer;
/// use coverage_engine::config::{BufferSettings, RoundingMode};
/// use coverage_engine::models::ShiftTotals;
///
/// let result = apply_buffer(&[], &BufferSettings::default(), RoundingMode::HalfEven)?;
/// assert_eq!(result.adjusted, ShiftTotals::new(0, 0));
/// # Ok::<(), coverage_engine::error::EngineError>(())
/// ```
pub fn apply_buffer(
    entries: &[ClinicianEntry],
    settings: &BufferSettings,
    rounding: RoundingMode,
) -> EngineResult<BufferedTotals> {
    let (app_raw, non_app_raw) = sum_by_class(entries, settings);
    let raw = app_raw + non_app_raw;

    if !settings.enabled {
        return Ok(BufferedTotals {
            raw,
            app_raw,
            non_app_raw,
            adjusted: raw,
            buffer_applied: false,
        });
    }

    let scale = |totals: ShiftTotals, class: BufferClass| -> EngineResult<ShiftTotals> {
        let factor = settings.factor(class);
        Ok(ShiftTotals::new(
            scale_shifts(totals.day, factor, rounding)?,
            scale_shifts(totals.night, factor, rounding)?,
        ))
    };

    let adjusted = scale(app_raw, BufferClass::App)? + scale(non_app_raw, BufferClass::NonApp)?;

    Ok(BufferedTotals {
        raw,
        app_raw,
        non_app_raw,
        adjusted,
        buffer_applied: true,
    })
}
