//! Minimum-curvature solver between two adjacent survey stations
//!
//! Assumes the wellbore follows a circular arc between stations. The arc is
//! replaced by two tangent segments scaled by the ratio factor:
//!
//! RF = (2 / DL) × tan(DL / 2)
//!
//! Where DL is the dogleg angle between the two station tangent vectors:
//!
//! cos DL = cos(I2 − I1) − sin I1 × sin I2 × (1 − cos(A2 − A1))

use crate::config::defaults::{DLS_COURSE_LENGTH_M, MIN_DOGLEG_RAD};
use crate::types::SurveyStation;

/// Incremental displacement and curvature between two stations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureDelta {
    /// Course length md2 − md1 (m)
    pub course_length_m: f64,
    pub d_tvd_m: f64,
    pub d_ns_m: f64,
    pub d_ew_m: f64,
    /// Dogleg angle (radians)
    pub dogleg_rad: f64,
    /// Dogleg severity (deg/30m)
    pub dls_deg_per_30m: f64,
    pub ratio_factor: f64,
}

impl CurvatureDelta {
    /// Result for a non-positive course length: no displacement, no curvature.
    pub const ZERO: Self = Self {
        course_length_m: 0.0,
        d_tvd_m: 0.0,
        d_ns_m: 0.0,
        d_ew_m: 0.0,
        dogleg_rad: 0.0,
        dls_deg_per_30m: 0.0,
        ratio_factor: 1.0,
    };
}

/// Dogleg angle between two station directions (radians).
///
/// The cosine is clamped to [-1, 1] before `acos` to absorb rounding overshoot.
pub fn dogleg_angle(inc1_deg: f64, azi1_deg: f64, inc2_deg: f64, azi2_deg: f64) -> f64 {
    let (i1, i2) = (inc1_deg.to_radians(), inc2_deg.to_radians());
    let (a1, a2) = (azi1_deg.to_radians(), azi2_deg.to_radians());

    let cos_dl = (i2 - i1).cos() - i1.sin() * i2.sin() * (1.0 - (a2 - a1).cos());
    cos_dl.clamp(-1.0, 1.0).acos()
}

/// Ratio factor for a dogleg angle (radians).
///
/// Falls back to 1.0 (tangential) below `MIN_DOGLEG_RAD`.
pub fn ratio_factor(dogleg_rad: f64) -> f64 {
    if dogleg_rad < MIN_DOGLEG_RAD {
        1.0
    } else {
        (2.0 / dogleg_rad) * (dogleg_rad / 2.0).tan()
    }
}

/// Solve the minimum-curvature step from station 1 to station 2.
///
/// Never fails: a course length ≤ 0 (duplicate or out-of-order MD) yields
/// `CurvatureDelta::ZERO` so one bad station cannot halt a batch.
pub fn minimum_curvature(
    md1_m: f64,
    inc1_deg: f64,
    azi1_deg: f64,
    md2_m: f64,
    inc2_deg: f64,
    azi2_deg: f64,
) -> CurvatureDelta {
    let course_length_m = md2_m - md1_m;
    if course_length_m.is_nan() || course_length_m <= 0.0 {
        return CurvatureDelta::ZERO;
    }

    let dogleg_rad = dogleg_angle(inc1_deg, azi1_deg, inc2_deg, azi2_deg);
    let dls_deg_per_30m = dogleg_rad.to_degrees() / course_length_m * DLS_COURSE_LENGTH_M;
    let rf = ratio_factor(dogleg_rad);

    let (i1, i2) = (inc1_deg.to_radians(), inc2_deg.to_radians());
    let (a1, a2) = (azi1_deg.to_radians(), azi2_deg.to_radians());
    let half = course_length_m / 2.0;

    CurvatureDelta {
        course_length_m,
        d_tvd_m: half * (i1.cos() + i2.cos()) * rf,
        d_ns_m: half * (i1.sin() * a1.cos() + i2.sin() * a2.cos()) * rf,
        d_ew_m: half * (i1.sin() * a1.sin() + i2.sin() * a2.sin()) * rf,
        dogleg_rad,
        dls_deg_per_30m,
        ratio_factor: rf,
    }
}

/// Station-typed convenience over [`minimum_curvature`].
pub fn minimum_curvature_between(from: &SurveyStation, to: &SurveyStation) -> CurvatureDelta {
    minimum_curvature(
        from.md_m, from.inc_deg, from.azi_deg, to.md_m, to.inc_deg, to.azi_deg,
    )
}
