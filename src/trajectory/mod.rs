//! Trajectory Engine
//!
//! Deterministic wellbore position calculations from directional surveys.
//! Pure functions over plain data: no I/O, no shared state.
//!
//! ## Recalculation
//! - `recalculate()` - Fresh station sequence from raw md/inc/azi + tie-in
//! - `recalculate_in_place()` - Same pass writing into a caller-owned buffer
//!
//! ## Per-station helpers
//! - `minimum_curvature()` - Position delta and DLS between two stations
//! - `build_rate()` / `turn_rate()` - Raw angle-change rates
//! - `vertical_section()` - Projection onto the reference azimuth
//!
//! ## Reporting
//! - `summarize()` - Headline numbers for a recalculated trajectory
//! - `plan_check::compare()` - Imported plan vs recalculated positions

pub mod minimum_curvature;
pub mod plan_check;

pub use minimum_curvature::{
    dogleg_angle, minimum_curvature, minimum_curvature_between, ratio_factor, CurvatureDelta,
};
pub use plan_check::{compare as compare_to_plan, PlanDeviation};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::defaults::DLS_COURSE_LENGTH_M;
use crate::types::{SurveyStation, TieIn};

// ============================================================================
// Recalculation Pass
// ============================================================================

/// Recompute every derived field from the stations' raw md/inc/azi.
///
/// Returns a new sequence of the same length; the input is untouched.
/// Stations must be ordered by ascending MD. Steps with non-increasing MD
/// contribute no displacement and zero rates instead of failing.
pub fn recalculate(stations: &[SurveyStation], tie_in: &TieIn) -> Vec<SurveyStation> {
    let mut out = stations.to_vec();
    recalculate_in_place(&mut out, tie_in);
    out
}

/// In-place form of [`recalculate`].
///
/// Station `i` is computed from station `i − 1` after `i − 1` has been
/// rewritten, so a single forward pass suffices. Empty input is a no-op.
pub fn recalculate_in_place(stations: &mut [SurveyStation], tie_in: &TieIn) {
    let Some(first) = stations.first_mut() else {
        return;
    };

    let vsd_rad = tie_in.vsd_direction_deg.to_radians();

    first.tvd_m = tie_in.tvd_m;
    first.ns_m = tie_in.ns_m;
    first.ew_m = tie_in.ew_m;
    first.vs_m = vertical_section(first.ns_m, first.ew_m, vsd_rad);
    first.dls_deg_per_30m = 0.0;
    first.build_rate_deg_per_30m = 0.0;
    first.turn_rate_deg_per_30m = 0.0;
    first.subsea_m = subsea(tie_in, first.tvd_m);

    for i in 1..stations.len() {
        let prev = stations[i - 1];
        let station = &mut stations[i];
        let delta = minimum_curvature_between(&prev, station);
        let course_length_m = station.md_m - prev.md_m;

        station.tvd_m = prev.tvd_m + delta.d_tvd_m;
        station.ns_m = prev.ns_m + delta.d_ns_m;
        station.ew_m = prev.ew_m + delta.d_ew_m;
        station.vs_m = vertical_section(station.ns_m, station.ew_m, vsd_rad);
        station.dls_deg_per_30m = delta.dls_deg_per_30m;
        station.build_rate_deg_per_30m = build_rate(prev.inc_deg, station.inc_deg, course_length_m);
        station.turn_rate_deg_per_30m = turn_rate(prev.azi_deg, station.azi_deg, course_length_m);
        station.subsea_m = subsea(tie_in, station.tvd_m);
    }

    if let Some(last) = stations.last() {
        debug!(
            stations = stations.len(),
            td_md_m = last.md_m,
            td_tvd_m = last.tvd_m,
            vsd_deg = tie_in.vsd_direction_deg,
            "Trajectory recalculated"
        );
    }
}

// ============================================================================
// Derived Quantities
// ============================================================================

fn subsea(tie_in: &TieIn, tvd_m: f64) -> Option<f64> {
    tie_in.kb_elevation_m.map(|kb| kb - tvd_m)
}

/// Project a horizontal displacement onto the vertical-section azimuth.
///
/// VS = N × cos θ + E × sin θ
pub fn vertical_section(ns_m: f64, ew_m: f64, vsd_rad: f64) -> f64 {
    ns_m * vsd_rad.cos() + ew_m * vsd_rad.sin()
}

/// Fold an azimuth difference into [-180, 180] degrees.
///
/// Picks the shorter turning direction, so 350° → 10° is +20°, not −340°.
/// Values already inside [-180, 180] pass through, so -180 stays -180.
/// Non-finite input is returned unchanged.
pub fn normalize_azimuth_delta(delta_deg: f64) -> f64 {
    if !delta_deg.is_finite() || (-180.0..=180.0).contains(&delta_deg) {
        return delta_deg;
    }
    let folded = delta_deg.rem_euclid(360.0);
    if folded > 180.0 {
        folded - 360.0
    } else {
        folded
    }
}

/// Inclination change per 30 m, from the raw station angles.
///
/// Returns 0 for a course length ≤ 0.
pub fn build_rate(inc1_deg: f64, inc2_deg: f64, course_length_m: f64) -> f64 {
    if course_length_m.is_nan() || course_length_m <= 0.0 {
        return 0.0;
    }
    (inc2_deg - inc1_deg) / course_length_m * DLS_COURSE_LENGTH_M
}

/// Azimuth change per 30 m in the shorter direction.
///
/// Returns 0 for a course length ≤ 0.
pub fn turn_rate(azi1_deg: f64, azi2_deg: f64, course_length_m: f64) -> f64 {
    if course_length_m.is_nan() || course_length_m <= 0.0 {
        return 0.0;
    }
    normalize_azimuth_delta(azi2_deg - azi1_deg) / course_length_m * DLS_COURSE_LENGTH_M
}

// ============================================================================
// Summary
// ============================================================================

/// Headline numbers for a recalculated trajectory
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub station_count: usize,
    /// MD of the deepest station (m)
    pub td_md_m: f64,
    /// TVD of the deepest station (m)
    pub td_tvd_m: f64,
    pub max_inc_deg: f64,
    pub max_dls_deg_per_30m: f64,
    /// MD where the maximum DLS occurs (m)
    pub max_dls_md_m: f64,
    pub closure_distance_m: f64,
    pub closure_azimuth_deg: f64,
}

/// Summarize a recalculated station sequence. Empty input gives the default.
pub fn summarize(stations: &[SurveyStation]) -> TrajectorySummary {
    let Some(last) = stations.last() else {
        return TrajectorySummary::default();
    };

    let mut summary = TrajectorySummary {
        station_count: stations.len(),
        td_md_m: last.md_m,
        td_tvd_m: last.tvd_m,
        closure_distance_m: last.closure_distance_m(),
        closure_azimuth_deg: last.closure_azimuth_deg(),
        ..Default::default()
    };

    for s in stations {
        if s.inc_deg > summary.max_inc_deg {
            summary.max_inc_deg = s.inc_deg;
        }
        if s.dls_deg_per_30m > summary.max_dls_deg_per_30m {
            summary.max_dls_deg_per_30m = s.dls_deg_per_30m;
            summary.max_dls_md_m = s.md_m;
        }
    }

    summary
}
