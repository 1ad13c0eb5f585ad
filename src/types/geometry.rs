//! Wellbore section types for the geometry model

use serde::{Deserialize, Serialize};

/// A contiguous measured-depth interval `[top, bottom]`.
pub trait DepthInterval {
    fn top_depth_m(&self) -> f64;
    fn bottom_depth_m(&self) -> f64;

    /// Inclusive at both ends.
    fn covers(&self, md_m: f64) -> bool {
        self.top_depth_m() <= md_m && md_m <= self.bottom_depth_m()
    }
}

/// Open hole or casing interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnulusSection {
    pub top_depth_m: f64,
    pub bottom_depth_m: f64,
    /// Hole (or casing inner) diameter (m)
    pub inner_diameter_m: f64,
}

/// Drill-string component interval (pipe, HWDP, collars)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrillStringSection {
    pub top_depth_m: f64,
    pub bottom_depth_m: f64,
    pub outer_diameter_m: f64,
    pub inner_diameter_m: f64,
}

impl DepthInterval for AnnulusSection {
    fn top_depth_m(&self) -> f64 {
        self.top_depth_m
    }
    fn bottom_depth_m(&self) -> f64 {
        self.bottom_depth_m
    }
}

impl DepthInterval for DrillStringSection {
    fn top_depth_m(&self) -> f64 {
        self.top_depth_m
    }
    fn bottom_depth_m(&self) -> f64 {
        self.bottom_depth_m
    }
}

/// Which section list an overlap was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Annulus,
    DrillString,
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Annulus => write!(f, "annulus"),
            SectionKind::DrillString => write!(f, "drill string"),
        }
    }
}

/// Two same-kind sections sharing part of their depth range.
///
/// Indices refer to the sorted order held by the geometry model; the section
/// at `first` wins every query inside `[overlap_top_m, overlap_bottom_m]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionOverlap {
    pub kind: SectionKind,
    pub first: usize,
    pub second: usize,
    pub overlap_top_m: f64,
    pub overlap_bottom_m: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_is_inclusive() {
        let s = AnnulusSection {
            top_depth_m: 100.0,
            bottom_depth_m: 200.0,
            inner_diameter_m: 0.311,
        };
        assert!(s.covers(100.0));
        assert!(s.covers(200.0));
        assert!(!s.covers(99.999));
        assert!(!s.covers(200.001));
        assert!(!s.covers(f64::NAN));
    }
}
