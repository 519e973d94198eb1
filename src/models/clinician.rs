//! Clinician type model.
//!
//! This module defines the [`ClinicianType`] tag that selects which
//! scheduling rule converts a group's parameters into shift contributions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The scheduling rule family a clinician type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFamily {
    /// Fixed day/night shifts per 28-day rotation.
    Rotation {
        /// Day shifts worked per rotation.
        day_per_rotation: u32,
        /// Night shifts worked per rotation.
        night_per_rotation: u32,
    },
    /// Night shifts only, entered as a direct total.
    NightFellowship,
    /// APP shifts entered per month and scaled to a year.
    AppMonthly {
        /// Whether the APP group also covers day shifts.
        covers_days: bool,
    },
    /// Custom per-rotation rates.
    CustomRotation,
    /// Custom per-month rates.
    CustomMonthly,
}

/// Identifies the scheduling rule applied to a clinician group.
///
/// # Example
///
/// ```
/// use coverage_engine::models::ClinicianType;
///
/// let clinician = ClinicianType::AppNightOnly;
/// assert_eq!(clinician.label(), "APP (Night Only)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicianType {
    /// Madigan rotators.
    Madigan,
    /// VM rotators.
    Vm,
    /// Anesthesia interns (day shifts only).
    AnesthesiaIntern,
    /// Neurosurgery interns.
    NeurosurgeryIntern,
    /// Neurology residents on rotation.
    NeurologyResident,
    /// Neurology interns on rotation.
    NeurologyIntern,
    /// First-year fellows (nights only).
    #[serde(rename = "year1_fellow")]
    Year1Fellow,
    /// Second-year fellows (nights only).
    #[serde(rename = "year2_fellow")]
    Year2Fellow,
    /// Advanced practice providers covering nights only.
    AppNightOnly,
    /// Advanced practice providers covering days and nights.
    AppDayAndNight,
    /// Any other group scheduled per rotation with custom rates.
    OtherPerRotation,
    /// Any other group scheduled per month with custom rates.
    OtherPerMonth,
}

impl ClinicianType {
    /// Every clinician type, in the order a picker presents them.
    pub const ALL: [ClinicianType; 12] = [
        ClinicianType::Madigan,
        ClinicianType::Vm,
        ClinicianType::AnesthesiaIntern,
        ClinicianType::NeurosurgeryIntern,
        ClinicianType::NeurologyResident,
        ClinicianType::NeurologyIntern,
        ClinicianType::AppNightOnly,
        ClinicianType::AppDayAndNight,
        ClinicianType::Year1Fellow,
        ClinicianType::Year2Fellow,
        ClinicianType::OtherPerRotation,
        ClinicianType::OtherPerMonth,
    ];

    /// Returns the display label for this clinician type.
    pub fn label(self) -> &'static str {
        match self {
            ClinicianType::Madigan => "Madigan",
            ClinicianType::Vm => "VM",
            ClinicianType::AnesthesiaIntern => "Anesthesia Intern",
            ClinicianType::NeurosurgeryIntern => "Neurosurgery Intern",
            ClinicianType::NeurologyResident => "Neurology Resident",
            ClinicianType::NeurologyIntern => "Neurology Intern",
            ClinicianType::Year1Fellow => "Year 1 Fellow",
            ClinicianType::Year2Fellow => "Year 2 Fellow",
            ClinicianType::AppNightOnly => "APP (Night Only)",
            ClinicianType::AppDayAndNight => "APP (Day & Night)",
            ClinicianType::OtherPerRotation => "Other (Per Rotation)",
            ClinicianType::OtherPerMonth => "Other (Per Month)",
        }
    }

    /// Returns the rule family, including fixed per-rotation rates.
    pub fn family(self) -> RuleFamily {
        let rotation = |day_per_rotation, night_per_rotation| RuleFamily::Rotation {
            day_per_rotation,
            night_per_rotation,
        };

        match self {
            ClinicianType::Madigan => rotation(10, 12),
            ClinicianType::Vm => rotation(16, 6),
            ClinicianType::AnesthesiaIntern => rotation(24, 0),
            ClinicianType::NeurosurgeryIntern => rotation(14, 6),
            ClinicianType::NeurologyResident | ClinicianType::NeurologyIntern => rotation(17, 5),
            ClinicianType::Year1Fellow | ClinicianType::Year2Fellow => RuleFamily::NightFellowship,
            ClinicianType::AppNightOnly => RuleFamily::AppMonthly { covers_days: false },
            ClinicianType::AppDayAndNight => RuleFamily::AppMonthly { covers_days: true },
            ClinicianType::OtherPerRotation => RuleFamily::CustomRotation,
            ClinicianType::OtherPerMonth => RuleFamily::CustomMonthly,
        }
    }

    /// Returns true for the two APP variants.
    pub fn is_app(self) -> bool {
        matches!(self.family(), RuleFamily::AppMonthly { .. })
    }
}

impl fmt::Display for ClinicianType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_snake_case_tags() {
        let madigan: ClinicianType = serde_json::from_str("\"madigan\"").unwrap();
        assert_eq!(madigan, ClinicianType::Madigan);

        let fellow: ClinicianType = serde_json::from_str("\"year1_fellow\"").unwrap();
        assert_eq!(fellow, ClinicianType::Year1Fellow);

        let app: ClinicianType = serde_json::from_str("\"app_day_and_night\"").unwrap();
        assert_eq!(app, ClinicianType::AppDayAndNight);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let result: Result<ClinicianType, _> = serde_json::from_str("\"surgeon\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_rotation_rates() {
        assert_eq!(
            ClinicianType::Madigan.family(),
            RuleFamily::Rotation {
                day_per_rotation: 10,
                night_per_rotation: 12
            }
        );
        assert_eq!(
            ClinicianType::AnesthesiaIntern.family(),
            RuleFamily::Rotation {
                day_per_rotation: 24,
                night_per_rotation: 0
            }
        );
        assert_eq!(
            ClinicianType::NeurologyIntern.family(),
            ClinicianType::NeurologyResident.family()
        );
    }

    #[test]
    fn test_only_app_variants_are_app() {
        let apps: Vec<_> = ClinicianType::ALL
            .iter()
            .filter(|t| t.is_app())
            .copied()
            .collect();
        assert_eq!(
            apps,
            vec![ClinicianType::AppNightOnly, ClinicianType::AppDayAndNight]
        );
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(ClinicianType::Vm.to_string(), "VM");
        assert_eq!(ClinicianType::OtherPerMonth.to_string(), "Other (Per Month)");
    }
}
