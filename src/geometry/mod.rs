//! Wellbore Geometry Model
//!
//! Depth-indexed lookup of hole and drill-string diameters for the
//! hydraulics and swab/surge calculations that step along the well.
//!
//! ## Lookup rules
//! - First section in ascending `top_depth_m` order whose `[top, bottom]`
//!   covers the depth wins. Overlaps are allowed and not merged.
//! - A depth covered by no section reads as 0 (no wellbore data).
//! - Pipe queries below `current_string_bottom_md_m` read as 0: the string
//!   has not reached that depth, or has been pulled above it.
//! - Every diameter is clamped to ≥ 0.
//!
//! The model is built once per query context (e.g. per simulation step) and
//! never mutated afterwards.

use std::cmp::Ordering;
use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::types::{
    AnnulusSection, DepthInterval, DrillStringSection, SectionKind, SectionOverlap,
};

/// Immutable snapshot of the well's annulus and drill-string sections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryModel {
    annulus: Vec<AnnulusSection>,
    drill_string: Vec<DrillStringSection>,
    current_string_bottom_md_m: f64,
}

impl GeometryModel {
    /// Build a model, sorting each section list by top depth.
    ///
    /// The sort is stable, so sections sharing a top depth keep their input order.
    pub fn new(
        mut annulus: Vec<AnnulusSection>,
        mut drill_string: Vec<DrillStringSection>,
        current_string_bottom_md_m: f64,
    ) -> Self {
        sort_by_top(&mut annulus);
        sort_by_top(&mut drill_string);

        let model = Self {
            annulus,
            drill_string,
            current_string_bottom_md_m,
        };

        let overlaps = model.overlaps();
        if !overlaps.is_empty() {
            warn!(
                count = overlaps.len(),
                "Geometry sections overlap; the shallower-topped section wins inside each overlap"
            );
        }
        debug!(
            annulus_sections = model.annulus.len(),
            string_sections = model.drill_string.len(),
            string_bottom_md_m = current_string_bottom_md_m,
            "Geometry model built"
        );

        model
    }

    pub fn annulus_sections(&self) -> &[AnnulusSection] {
        &self.annulus
    }

    pub fn drill_string_sections(&self) -> &[DrillStringSection] {
        &self.drill_string
    }

    pub fn current_string_bottom_md_m(&self) -> f64 {
        self.current_string_bottom_md_m
    }

    // ========================================================================
    // Base Queries
    // ========================================================================

    /// Hole (annulus outer) diameter at `md_m`, or 0 if uncovered.
    pub fn hole_diameter_m(&self, md_m: f64) -> f64 {
        first_covering(&self.annulus, md_m).map_or(0.0, |s| s.inner_diameter_m.max(0.0))
    }

    /// Pipe outer diameter at `md_m`, or 0 if no pipe is there.
    pub fn pipe_outer_diameter_m(&self, md_m: f64) -> f64 {
        self.string_section_at(md_m)
            .map_or(0.0, |s| s.outer_diameter_m.max(0.0))
    }

    /// Pipe inner diameter at `md_m`, or 0 if no pipe is there.
    pub fn pipe_inner_diameter_m(&self, md_m: f64) -> f64 {
        self.string_section_at(md_m)
            .map_or(0.0, |s| s.inner_diameter_m.max(0.0))
    }

    fn string_section_at(&self, md_m: f64) -> Option<&DrillStringSection> {
        match md_m.partial_cmp(&self.current_string_bottom_md_m) {
            Some(Ordering::Less | Ordering::Equal) => first_covering(&self.drill_string, md_m),
            _ => None,
        }
    }

    // ========================================================================
    // Derived Helpers
    // ========================================================================

    /// Radial clearance as a diameter difference: max(hole − OD, 0)
    pub fn annulus_gap_m(&self, md_m: f64) -> f64 {
        (self.hole_diameter_m(md_m) - self.pipe_outer_diameter_m(md_m)).max(0.0)
    }

    /// Area enclosed by the pipe OD: π × OD² / 4 (m²)
    pub fn pipe_metal_area_m2(&self, md_m: f64) -> f64 {
        let od = self.pipe_outer_diameter_m(md_m);
        PI * od * od / 4.0
    }

    /// Flow area inside the pipe: π × ID² / 4 (m²)
    pub fn pipe_bore_area_m2(&self, md_m: f64) -> f64 {
        let id = self.pipe_inner_diameter_m(md_m);
        PI * id * id / 4.0
    }

    /// Annular flow area: max(0, π × (hole² − OD²) / 4) (m²)
    pub fn annulus_flow_area_m2(&self, md_m: f64) -> f64 {
        let hole = self.hole_diameter_m(md_m);
        let od = self.pipe_outer_diameter_m(md_m);
        (PI * (hole * hole - od * od) / 4.0).max(0.0)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Report every pair of same-kind sections whose depth ranges intersect.
    ///
    /// Purely informational: queries keep using first-match order.
    pub fn overlaps(&self) -> Vec<SectionOverlap> {
        let mut found = find_overlaps(&self.annulus, SectionKind::Annulus);
        found.extend(find_overlaps(&self.drill_string, SectionKind::DrillString));
        found
    }
}

fn sort_by_top<S: DepthInterval>(sections: &mut [S]) {
    sections.sort_by(|a, b| a.top_depth_m().total_cmp(&b.top_depth_m()));
}

fn first_covering<S: DepthInterval>(sections: &[S], md_m: f64) -> Option<&S> {
    sections.iter().find(|s| s.covers(md_m))
}

fn find_overlaps<S: DepthInterval>(sections: &[S], kind: SectionKind) -> Vec<SectionOverlap> {
    let mut found = Vec::new();
    for (i, a) in sections.iter().enumerate() {
        for (j, b) in sections.iter().enumerate().skip(i + 1) {
            let top = a.top_depth_m().max(b.top_depth_m());
            let bottom = a.bottom_depth_m().min(b.bottom_depth_m());
            if top <= bottom {
                found.push(SectionOverlap {
                    kind,
                    first: i,
                    second: j,
                    overlap_top_m: top,
                    overlap_bottom_m: bottom,
                });
            }
        }
    }
    found
}
