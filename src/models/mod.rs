//! Core data models for the Coverage Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clinician;
mod coverage;
mod entry;
mod roster;
mod staffing_model;

pub use clinician::{ClinicianType, RuleFamily};
pub use coverage::{BufferClass, CoverageReport, CoverageResult, EntryRow, ShiftTotals};
pub use entry::{AccountingBasis, ClinicianEntry};
pub use roster::{ROSTER_SNAPSHOT_VERSION, Roster, RosterSnapshot};
pub use staffing_model::{DAYS_PER_YEAR, StaffingModel};
