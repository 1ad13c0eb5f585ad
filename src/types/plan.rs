//! Imported well-plan types

use serde::{Deserialize, Serialize};

use super::SurveyStation;

/// One row of an imported plan, as written in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawStation {
    pub md_m: f64,
    pub inc_deg: f64,
    pub azi_deg: f64,
    pub tvd_m: f64,
    pub ns_m: f64,
    pub ew_m: f64,
    /// Vertical section, when the source carries that column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs_m: Option<f64>,
}

/// File-level metadata found alongside the rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    /// File name or caller-supplied label
    pub source_name: String,
    /// Vertical-section reference azimuth declared in the file (degrees)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vs_azimuth_deg: Option<f64>,
}

/// Result of a plan import: rows sorted ascending by MD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedPlan {
    pub metadata: PlanMetadata,
    pub rows: Vec<RawStation>,
    /// Data lines dropped for unparsable required fields
    #[serde(default)]
    pub skipped_rows: usize,
}

impl ParsedPlan {
    /// Stations carrying only md/inc/azi, ready for recalculation.
    pub fn to_stations(&self) -> Vec<SurveyStation> {
        self.rows
            .iter()
            .map(|r| SurveyStation::new(r.md_m, r.inc_deg, r.azi_deg))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
