//! Calculation logic for the Coverage Engine.
//!
//! This module contains the shift contribution rules for each clinician
//! type, the attrition buffer applied to roster totals, the staffing model
//! comparison, and the report assembly that ties them together.

mod buffer;
mod comparison;
mod contribution;
mod report;

pub use buffer::{BufferedTotals, apply_buffer, scale_shifts, sum_by_class};
pub use comparison::{PERCENT_DECIMAL_PLACES, compare_models, coverage_percent};
pub use contribution::{
    Contribution, ContributionParams, MAX_DAYS_PER_MONTH, MAX_NIGHTS_PER_MONTH,
    compute_contribution,
};
pub use report::build_report;
