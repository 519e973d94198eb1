//! Roster entry model.
//!
//! A [`ClinicianEntry`] is the immutable record stored in a roster once a
//! clinician group's contribution has been computed.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{ClinicianType, RuleFamily};

/// How an entry's shifts were accounted for.
///
/// Rotation-based groups carry their rotation count, monthly groups carry
/// their headcount, and fellowship groups are entered directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountingBasis {
    /// Shifts were derived from a number of 28-day rotations.
    RotationBased {
        /// The number of rotations.
        rotations: u32,
    },
    /// Shifts were derived from per-month rates and a headcount.
    MonthlyBased {
        /// The number of clinicians in the group.
        headcount: u32,
    },
    /// Shifts were entered as a direct total.
    Direct,
}

impl AccountingBasis {
    /// Returns the rotation count for rotation-based entries.
    pub fn rotations(&self) -> Option<u32> {
        match self {
            AccountingBasis::RotationBased { rotations } => Some(*rotations),
            _ => None,
        }
    }

    /// Returns the headcount for monthly entries.
    pub fn headcount(&self) -> Option<u32> {
        match self {
            AccountingBasis::MonthlyBased { headcount } => Some(*headcount),
            _ => None,
        }
    }
}

/// A clinician group added to a roster.
///
/// # Example
///
/// ```
/// use coverage_engine::models::{AccountingBasis, ClinicianEntry, ClinicianType};
///
/// let entry = ClinicianEntry {
///     clinician_type: ClinicianType::Madigan,
///     day_shifts: 20,
///     night_shifts: 24,
///     basis: AccountingBasis::RotationBased { rotations: 2 },
/// };
/// assert_eq!(entry.basis.rotations(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicianEntry {
    /// The scheduling rule that produced this entry.
    pub clinician_type: ClinicianType,
    /// Annual day shifts contributed by the group.
    pub day_shifts: u32,
    /// Annual night shifts contributed by the group.
    pub night_shifts: u32,
    /// The accounting basis the shifts were derived from.
    pub basis: AccountingBasis,
}

impl ClinicianEntry {
    /// Checks that the entry is consistent with its clinician type's rule.
    ///
    /// The basis must match the rule family, counts must be positive, and
    /// fixed-rate rotation types must carry exactly `rate x rotations`
    /// shifts. Types without day coverage must have no day shifts.
    /// Violations are reported as `InvalidParameter` against `field`.
    pub fn validate(&self, field: &str) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::invalid_parameter(field, message));
        let label = self.clinician_type.label();

        match (self.clinician_type.family(), self.basis) {
            (
                RuleFamily::Rotation {
                    day_per_rotation,
                    night_per_rotation,
                },
                AccountingBasis::RotationBased { rotations },
            ) => {
                if rotations == 0 {
                    return invalid(format!("{} must have at least 1 rotation", label));
                }
                let expected = (
                    day_per_rotation.checked_mul(rotations),
                    night_per_rotation.checked_mul(rotations),
                );
                if expected != (Some(self.day_shifts), Some(self.night_shifts)) {
                    return invalid(format!(
                        "{} with {} rotations must have {} day and {} night shifts per rotation",
                        label, rotations, day_per_rotation, night_per_rotation
                    ));
                }
            }
            (RuleFamily::CustomRotation, AccountingBasis::RotationBased { rotations }) => {
                if rotations == 0 {
                    return invalid(format!("{} must have at least 1 rotation", label));
                }
            }
            (RuleFamily::NightFellowship, AccountingBasis::Direct) => {
                if self.day_shifts != 0 {
                    return invalid(format!("{} covers nights only", label));
                }
            }
            (RuleFamily::AppMonthly { covers_days }, AccountingBasis::MonthlyBased { headcount }) => {
                if headcount == 0 {
                    return invalid(format!("{} must have a headcount of at least 1", label));
                }
                if !covers_days && self.day_shifts != 0 {
                    return invalid(format!("{} covers nights only", label));
                }
            }
            (RuleFamily::CustomMonthly, AccountingBasis::MonthlyBased { headcount }) => {
                if headcount == 0 {
                    return invalid(format!("{} must have a headcount of at least 1", label));
                }
            }
            (_, basis) => {
                return invalid(format!("{} cannot have a {:?} basis", label, basis));
            }
        }

        Ok(())
    }
}
