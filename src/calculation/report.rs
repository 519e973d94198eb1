//! Coverage report assembly.
//!
//! One recomputation over a roster: buffer the totals (or bypass the buffer),
//! compare them against every configured staffing model, and list the
//! entries with their derived columns.

use chrono::Utc;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{CoverageReport, EntryRow, Roster};

use super::{apply_buffer, compare_models};

/// Builds the coverage report for a roster.
///
/// The staffing models are compared against the buffer-adjusted totals,
/// which equal the raw totals when the buffer is disabled.
///
/// # Example
///
/// ```
/// use coverage_engine::calculation::build_report;
/// use coverage_engine::config::{CalculatorSettings, ConfigLoader};
/// use coverage_engine::models::{Roster, ShiftTotals, StaffingModel};
///
/// let config = ConfigLoader::from_parts(
///     CalculatorSettings::default(),
///     vec![StaffingModel::new("6:2", 6, 2)],
/// )?;
/// let report = build_report(&Roster::new(), &config)?;
/// assert_eq!(report.adjusted_totals, ShiftTotals::new(0, 0));
/// assert_eq!(report.coverage.len(), 1);
/// # Ok::<(), coverage_engine::error::EngineError>(())
/// ```
pub fn build_report(roster: &Roster, config: &ConfigLoader) -> EngineResult<CoverageReport> {
    let settings = config.settings();

    let buffered = apply_buffer(roster.all(), &settings.buffer, settings.rounding)?;
    let coverage = compare_models(buffered.adjusted, config.models(), settings.rounding)?;

    let entries = roster
        .all()
        .iter()
        .enumerate()
        .map(|(position, entry)| EntryRow {
            position,
            clinician_type: entry.clinician_type,
            label: entry.clinician_type.label().to_string(),
            day_shifts: entry.day_shifts,
            night_shifts: entry.night_shifts,
            basis: entry.basis,
            buffer_class: settings.buffer.class_of(entry.clinician_type),
        })
        .collect();

    Ok(CoverageReport {
        raw_totals: buffered.raw,
        adjusted_totals: buffered.adjusted,
        buffer_applied: buffered.buffer_applied,
        coverage,
        entries,
        calculated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{ContributionParams, compute_contribution};
    use crate::config::CalculatorSettings;
    use crate::models::{
        AccountingBasis, BufferClass, ClinicianType, ShiftTotals, StaffingModel,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config_with(settings: CalculatorSettings) -> ConfigLoader {
        ConfigLoader::from_parts(
            settings,
            vec![
                StaffingModel::new("6:2", 6, 2),
                StaffingModel::new("8:3", 8, 3),
            ],
        )
        .unwrap()
    }

    fn add(roster: &mut Roster, clinician_type: ClinicianType, params: ContributionParams) {
        let contribution =
            compute_contribution(clinician_type, &params, &CalculatorSettings::default()).unwrap();
        roster.add(contribution.into_entry());
    }

    fn rotations(n: i64) -> ContributionParams {
        ContributionParams {
            rotations: Some(n),
            ..Default::default()
        }
    }

    #[test]
    fn test_madigan_and_vm_report() {
        let mut roster = Roster::new();
        add(&mut roster, ClinicianType::Madigan, rotations(1));
        add(&mut roster, ClinicianType::Vm, rotations(1));

        let report = build_report(&roster, &config_with(CalculatorSettings::default())).unwrap();

        assert_eq!(report.raw_totals, ShiftTotals::new(26, 18));
        assert_eq!(report.adjusted_totals, ShiftTotals::new(22, 15));
        assert!(report.buffer_applied);

        let six_two = &report.coverage[0];
        assert_eq!(six_two.model, "6:2");
        assert_eq!(six_two.pct_days_covered, dec("1.0"));
        assert_eq!(six_two.pct_nights_covered, dec("2.1"));

        let eight_three = &report.coverage[1];
        assert_eq!(eight_three.day_needed, 2920);
        assert_eq!(eight_three.night_covered, 15);
    }

    #[test]
    fn test_entry_rows_carry_derived_columns() {
        let mut roster = Roster::new();
        add(&mut roster, ClinicianType::Madigan, rotations(2));
        add(
            &mut roster,
            ClinicianType::AppNightOnly,
            ContributionParams {
                headcount: Some(2),
                nights_per_month: Some(10),
                ..Default::default()
            },
        );

        let report = build_report(&roster, &config_with(CalculatorSettings::default())).unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].position, 0);
        assert_eq!(report.entries[0].label, "Madigan");
        assert_eq!(report.entries[0].buffer_class, BufferClass::NonApp);
        assert_eq!(report.entries[1].position, 1);
        assert_eq!(report.entries[1].night_shifts, 240);
        assert_eq!(
            report.entries[1].basis,
            AccountingBasis::MonthlyBased { headcount: 2 }
        );
        assert_eq!(report.entries[1].buffer_class, BufferClass::App);
    }

    #[test]
    fn test_disabled_buffer_compares_raw_totals() {
        let mut settings = CalculatorSettings::default();
        settings.buffer.enabled = false;

        let mut roster = Roster::new();
        add(&mut roster, ClinicianType::Madigan, rotations(1));
        add(&mut roster, ClinicianType::Vm, rotations(1));

        let report = build_report(&roster, &config_with(settings)).unwrap();

        assert!(!report.buffer_applied);
        assert_eq!(report.adjusted_totals, ShiftTotals::new(26, 18));
        assert_eq!(report.coverage[0].day_covered, 26);
        // 26 / 2190 = 1.187% -> 1.2
        assert_eq!(report.coverage[0].pct_days_covered, dec("1.2"));
    }

    #[test]
    fn test_empty_roster_report() {
        let report =
            build_report(&Roster::new(), &config_with(CalculatorSettings::default())).unwrap();

        assert_eq!(report.raw_totals, ShiftTotals::default());
        assert!(report.entries.is_empty());
        assert!(
            report
                .coverage
                .iter()
                .all(|c| c.pct_days_covered.is_zero() && c.pct_nights_covered.is_zero())
        );
    }
}
