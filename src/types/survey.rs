//! Survey station and tie-in types

use serde::{Deserialize, Serialize};

/// One measured point along the wellbore path.
///
/// `md_m`, `inc_deg` and `azi_deg` are inputs. Every other field is derived
/// and overwritten by each recalculation pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurveyStation {
    /// Measured depth (m)
    pub md_m: f64,
    /// Inclination from vertical (degrees, 0-180)
    pub inc_deg: f64,
    /// Azimuth from north (degrees, 0-360)
    pub azi_deg: f64,

    // === Derived ===
    /// True vertical depth (m)
    #[serde(default)]
    pub tvd_m: f64,
    /// North displacement from tie-in (m, negative = south)
    #[serde(default)]
    pub ns_m: f64,
    /// East displacement from tie-in (m, negative = west)
    #[serde(default)]
    pub ew_m: f64,
    /// Vertical section along the reference azimuth (m)
    #[serde(default)]
    pub vs_m: f64,
    /// Dogleg severity (deg/30m)
    #[serde(default)]
    pub dls_deg_per_30m: f64,
    /// Inclination change rate (deg/30m)
    #[serde(default)]
    pub build_rate_deg_per_30m: f64,
    /// Azimuth change rate, shorter direction (deg/30m)
    #[serde(default)]
    pub turn_rate_deg_per_30m: f64,
    /// Depth below the reference elevation, present only when a KB elevation is supplied (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsea_m: Option<f64>,
}

impl SurveyStation {
    /// Station carrying only its input fields; derived fields start at zero.
    pub fn new(md_m: f64, inc_deg: f64, azi_deg: f64) -> Self {
        Self {
            md_m,
            inc_deg,
            azi_deg,
            ..Default::default()
        }
    }

    /// Horizontal distance from the tie-in point (m)
    pub fn closure_distance_m(&self) -> f64 {
        self.ns_m.hypot(self.ew_m)
    }

    /// Direction from the tie-in point to this station (degrees, 0-360).
    ///
    /// Returns 0 when the station sits directly below the tie-in.
    pub fn closure_azimuth_deg(&self) -> f64 {
        if self.ns_m == 0.0 && self.ew_m == 0.0 {
            return 0.0;
        }
        self.ew_m.atan2(self.ns_m).to_degrees().rem_euclid(360.0)
    }
}

/// Reference inputs for one recalculation pass.
///
/// Never stored on a station; supplied fresh on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TieIn {
    /// Vertical-section reference azimuth (degrees)
    #[serde(default)]
    pub vsd_direction_deg: f64,
    /// Kelly-bushing / reference elevation for subsea conversion (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kb_elevation_m: Option<f64>,
    /// Starting north displacement (m)
    #[serde(default)]
    pub ns_m: f64,
    /// Starting east displacement (m)
    #[serde(default)]
    pub ew_m: f64,
    /// Starting true vertical depth (m)
    #[serde(default)]
    pub tvd_m: f64,
}

impl TieIn {
    /// Tie-in at the origin with the given vertical-section azimuth.
    pub fn with_vsd(vsd_direction_deg: f64) -> Self {
        Self {
            vsd_direction_deg,
            ..Default::default()
        }
    }

    /// Same tie-in with a KB elevation, enabling subsea output.
    pub fn kb_elevation(mut self, kb_elevation_m: f64) -> Self {
        self.kb_elevation_m = Some(kb_elevation_m);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_station_has_zero_derived_fields() {
        let s = SurveyStation::new(1200.0, 35.0, 120.0);
        assert_eq!(s.md_m, 1200.0);
        assert_eq!(s.tvd_m, 0.0);
        assert_eq!(s.dls_deg_per_30m, 0.0);
        assert!(s.subsea_m.is_none());
    }

    #[test]
    fn test_closure_south_west() {
        let s = SurveyStation {
            ns_m: -30.0,
            ew_m: -40.0,
            ..Default::default()
        };
        assert!((s.closure_distance_m() - 50.0).abs() < 1e-12);
        // atan2(-40, -30) = -126.87 deg -> 233.13 deg
        assert!((s.closure_azimuth_deg() - 233.130_102).abs() < 1e-5);
    }

    #[test]
    fn test_closure_at_origin() {
        let s = SurveyStation::default();
        assert_eq!(s.closure_distance_m(), 0.0);
        assert_eq!(s.closure_azimuth_deg(), 0.0);
    }

    #[test]
    fn test_tie_in_builder() {
        let t = TieIn::with_vsd(45.0).kb_elevation(25.0);
        assert_eq!(t.vsd_direction_deg, 45.0);
        assert_eq!(t.kb_elevation_m, Some(25.0));
        assert_eq!((t.ns_m, t.ew_m, t.tvd_m), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_station_deserializes_without_derived_fields() {
        let s: SurveyStation =
            serde_json::from_str(r#"{"md_m": 100.0, "inc_deg": 2.5, "azi_deg": 310.0}"#).unwrap();
        assert_eq!(s, SurveyStation::new(100.0, 2.5, 310.0));
    }
}
