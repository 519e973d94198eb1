//! Request types for the Coverage Engine API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::calculation::ContributionParams;
use crate::models::ClinicianType;

/// Request body for `POST /sessions/:session_id/entries`.
///
/// The clinician type selects the rule; the remaining fields are the
/// type-specific parameters, e.g.
/// `{"clinician_type": "madigan", "rotations": 2}` or
/// `{"clinician_type": "app_night_only", "headcount": 1, "nights_per_month": 12}`.
/// Keys that are not a known parameter name are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawAddEntryRequest")]
pub struct AddEntryRequest {
    /// The scheduling rule to apply.
    pub clinician_type: ClinicianType,
    /// The parameters for that rule.
    #[serde(flatten)]
    pub params: ContributionParams,
}

#[derive(Deserialize)]
struct RawAddEntryRequest {
    clinician_type: ClinicianType,
    #[serde(flatten)]
    params: Map<String, Value>,
}

impl TryFrom<RawAddEntryRequest> for AddEntryRequest {
    type Error = serde_json::Error;

    fn try_from(raw: RawAddEntryRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            clinician_type: raw.clinician_type,
            params: serde_json::from_value(Value::Object(raw.params))?,
        })
    }
}
