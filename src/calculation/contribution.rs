//! Shift contribution rules.
//!
//! This module converts a clinician group's scheduling parameters into the
//! annual day and night shifts the group contributes. Rotation-based types
//! use fixed per-rotation rates, fellowships enter nights directly, and APP
//! and custom monthly groups scale per-month rates by the configured months
//! per year.

use serde::{Deserialize, Serialize};

use crate::config::CalculatorSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AccountingBasis, BufferClass, ClinicianEntry, ClinicianType, RuleFamily};

/// Upper bound for days worked per clinician per month.
pub const MAX_DAYS_PER_MONTH: i64 = 31;

/// Upper bound for nights worked per clinician per month.
pub const MAX_NIGHTS_PER_MONTH: i64 = 30;

/// User-supplied parameters for a clinician group.
///
/// Only the fields used by the selected [`ClinicianType`] may be set;
/// supplying any other field is rejected, as is any unknown key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContributionParams {
    /// Number of 28-day rotations (rotation-based and custom per-rotation).
    pub rotations: Option<i64>,
    /// Number of clinicians (APP and custom per-month).
    #[serde(alias = "app_count")]
    pub headcount: Option<i64>,
    /// Day shifts per clinician per month.
    pub days_per_month: Option<i64>,
    /// Night shifts per clinician per month.
    pub nights_per_month: Option<i64>,
    /// Custom day shifts per rotation.
    pub day_per_rotation: Option<i64>,
    /// Custom night shifts per rotation.
    pub night_per_rotation: Option<i64>,
    /// Total night shifts for a fellowship group.
    pub total_nights: Option<i64>,
}

impl ContributionParams {
    fn supplied(&self) -> [(&'static str, Option<i64>); 7] {
        [
            ("rotations", self.rotations),
            ("headcount", self.headcount),
            ("days_per_month", self.days_per_month),
            ("nights_per_month", self.nights_per_month),
            ("day_per_rotation", self.day_per_rotation),
            ("night_per_rotation", self.night_per_rotation),
            ("total_nights", self.total_nights),
        ]
    }
}

/// The fields each rule family reads.
fn fields_used(family: RuleFamily) -> &'static [&'static str] {
    match family {
        RuleFamily::Rotation { .. } => &["rotations"],
        RuleFamily::NightFellowship => &["total_nights"],
        RuleFamily::AppMonthly { covers_days: false } => &["headcount", "nights_per_month"],
        RuleFamily::AppMonthly { covers_days: true } | RuleFamily::CustomMonthly => {
            &["headcount", "days_per_month", "nights_per_month"]
        }
        RuleFamily::CustomRotation => &["rotations", "day_per_rotation", "night_per_rotation"],
    }
}

/// The computed contribution of one clinician group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// The clinician type the rule was applied for.
    pub clinician_type: ClinicianType,
    /// Annual day shifts.
    pub day_shifts: u32,
    /// Annual night shifts.
    pub night_shifts: u32,
    /// Whether the group is buffered as APP-class.
    pub is_app: bool,
    /// The accounting basis of the group.
    pub basis: AccountingBasis,
    /// Human-readable explanation of the arithmetic.
    pub reasoning: String,
}

impl Contribution {
    /// Converts the contribution into a roster entry.
    pub fn into_entry(self) -> ClinicianEntry {
        ClinicianEntry {
            clinician_type: self.clinician_type,
            day_shifts: self.day_shifts,
            night_shifts: self.night_shifts,
            basis: self.basis,
        }
    }
}

/// Reads a required parameter and checks it lies within `[min, max]`.
fn require(field: &str, value: Option<i64>, min: i64, max: Option<i64>) -> EngineResult<u32> {
    let value = value.ok_or_else(|| EngineError::invalid_parameter(field, "is required"))?;

    if value < 0 {
        return Err(EngineError::invalid_parameter(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    if value < min {
        return Err(EngineError::invalid_parameter(
            field,
            format!("must be at least {}, got {}", min, value),
        ));
    }
    if let Some(max) = max {
        if value > max {
            return Err(EngineError::invalid_parameter(
                field,
                format!("must be between {} and {}, got {}", min, max, value),
            ));
        }
    }

    u32::try_from(value)
        .map_err(|_| EngineError::invalid_parameter(field, format!("{} is too large", value)))
}

/// Multiplies factors, reporting overflow against `field`.
fn product(field: &str, factors: &[u32]) -> EngineResult<u32> {
    factors
        .iter()
        .try_fold(1u32, |acc, &f| acc.checked_mul(f))
        .ok_or_else(|| {
            EngineError::invalid_parameter(field, "results in more shifts than can be counted")
        })
}

/// Computes the annual shift contribution of a clinician group.
///
/// # Arguments
///
/// * `clinician_type` - The scheduling rule to apply
/// * `params` - The user-supplied parameters for the group
/// * `settings` - Calculator settings (months per year, buffer classes)
///
/// # Returns
///
/// Returns the day and night shifts, the APP flag and the accounting basis,
/// or `InvalidParameter` if a parameter is missing, unused by the rule,
/// negative, out of range or too large.
///
/// # Examples
///
/// ```
/// use coverage_engine::calculation::{ContributionParams, compute_contribution};
/// use coverage_engine::config::CalculatorSettings;
/// use coverage_engine::models::ClinicianType;
///
/// let params = ContributionParams {
///     rotations: Some(2),
///     ..Default::default()
/// };
/// let result =
///     compute_contribution(ClinicianType::Madigan, &params, &CalculatorSettings::default())?;
/// assert_eq!((result.day_shifts, result.night_shifts), (20, 24));
/// assert!(!result.is_app);
/// # Ok::<(), coverage_engine::error::EngineError>(())
/// ```
pub fn compute_contribution(
    clinician_type: ClinicianType,
    params: &ContributionParams,
    settings: &CalculatorSettings,
) -> EngineResult<Contribution> {
    let family = clinician_type.family();
    let used = fields_used(family);

    for (field, value) in params.supplied() {
        if value.is_some() && !used.contains(&field) {
            return Err(EngineError::invalid_parameter(
                field,
                format!("is not used by {}", clinician_type.label()),
            ));
        }
    }

    let months = settings.months_per_year;

    let (day_shifts, night_shifts, basis, reasoning) = match family {
        RuleFamily::Rotation {
            day_per_rotation,
            night_per_rotation,
        } => {
            let rotations = require("rotations", params.rotations, 1, None)?;
            let day = product("rotations", &[day_per_rotation, rotations])?;
            let night = product("rotations", &[night_per_rotation, rotations])?;
            (
                day,
                night,
                AccountingBasis::RotationBased { rotations },
                format!(
                    "{} rotations x {} day = {} day; {} rotations x {} night = {} night",
                    rotations, day_per_rotation, day, rotations, night_per_rotation, night
                ),
            )
        }
        RuleFamily::NightFellowship => {
            let nights = require("total_nights", params.total_nights, 0, None)?;
            (
                0,
                nights,
                AccountingBasis::Direct,
                format!("{} nights entered directly", nights),
            )
        }
        RuleFamily::AppMonthly { covers_days } => {
            let headcount = require("headcount", params.headcount, 1, None)?;
            let days = if covers_days {
                require(
                    "days_per_month",
                    params.days_per_month,
                    1,
                    Some(MAX_DAYS_PER_MONTH),
                )?
            } else {
                0
            };
            let nights = require(
                "nights_per_month",
                params.nights_per_month,
                0,
                Some(MAX_NIGHTS_PER_MONTH),
            )?;
            monthly(headcount, days, nights, months)?
        }
        RuleFamily::CustomRotation => {
            let rotations = require("rotations", params.rotations, 1, None)?;
            let day_rate = require("day_per_rotation", params.day_per_rotation, 0, None)?;
            let night_rate = require("night_per_rotation", params.night_per_rotation, 0, None)?;
            let day = product("day_per_rotation", &[day_rate, rotations])?;
            let night = product("night_per_rotation", &[night_rate, rotations])?;
            (
                day,
                night,
                AccountingBasis::RotationBased { rotations },
                format!(
                    "{} rotations x {} day = {} day; {} rotations x {} night = {} night",
                    rotations, day_rate, day, rotations, night_rate, night
                ),
            )
        }
        RuleFamily::CustomMonthly => {
            let headcount = require("headcount", params.headcount, 1, None)?;
            let days = require(
                "days_per_month",
                params.days_per_month,
                0,
                Some(MAX_DAYS_PER_MONTH),
            )?;
            let nights = require(
                "nights_per_month",
                params.nights_per_month,
                0,
                Some(MAX_NIGHTS_PER_MONTH),
            )?;
            monthly(headcount, days, nights, months)?
        }
    };

    Ok(Contribution {
        clinician_type,
        day_shifts,
        night_shifts,
        is_app: settings.buffer.class_of(clinician_type) == BufferClass::App,
        basis,
        reasoning,
    })
}

fn monthly(
    headcount: u32,
    days: u32,
    nights: u32,
    months: u32,
) -> EngineResult<(u32, u32, AccountingBasis, String)> {
    let day = product("headcount", &[days, months, headcount])?;
    let night = product("headcount", &[nights, months, headcount])?;
    Ok((
        day,
        night,
        AccountingBasis::MonthlyBased { headcount },
        format!(
            "{} x {} days x {} months = {} day; {} x {} nights x {} months = {} night",
            headcount, days, months, day, headcount, nights, months, night
        ),
    ))
}
