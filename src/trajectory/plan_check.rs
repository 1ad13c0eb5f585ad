//! Imported plan vs recalculated trajectory
//!
//! Plans carry their own TVD/NS/EW columns from whatever software produced
//! them. Recalculating from md/inc/azi and comparing exposes unit mix-ups,
//! a different tie-in, or a different calculation method.

use serde::{Deserialize, Serialize};

use crate::types::{ParsedPlan, SurveyStation};

/// Largest absolute differences between plan columns and recalculated values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDeviation {
    /// Rows compared (common prefix of plan and stations)
    pub compared: usize,
    pub max_tvd_diff_m: f64,
    pub max_ns_diff_m: f64,
    pub max_ew_diff_m: f64,
    /// Only over rows where the plan carried a VS value
    pub max_vs_diff_m: f64,
    /// Largest 3-D position difference (m)
    pub max_position_diff_m: f64,
    /// MD of the row with the largest 3-D difference (m)
    pub worst_md_m: f64,
}

/// Compare plan rows against recalculated stations, pairing by index.
pub fn compare(plan: &ParsedPlan, computed: &[SurveyStation]) -> PlanDeviation {
    let mut dev = PlanDeviation::default();

    for (row, station) in plan.rows.iter().zip(computed) {
        dev.compared += 1;

        let d_tvd = (row.tvd_m - station.tvd_m).abs();
        let d_ns = (row.ns_m - station.ns_m).abs();
        let d_ew = (row.ew_m - station.ew_m).abs();

        dev.max_tvd_diff_m = dev.max_tvd_diff_m.max(d_tvd);
        dev.max_ns_diff_m = dev.max_ns_diff_m.max(d_ns);
        dev.max_ew_diff_m = dev.max_ew_diff_m.max(d_ew);

        if let Some(vs) = row.vs_m {
            dev.max_vs_diff_m = dev.max_vs_diff_m.max((vs - station.vs_m).abs());
        }

        let position = (d_tvd * d_tvd + d_ns * d_ns + d_ew * d_ew).sqrt();
        if position > dev.max_position_diff_m {
            dev.max_position_diff_m = position;
            dev.worst_md_m = row.md_m;
        }
    }

    dev
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::recalculate;
    use crate::types::{PlanMetadata, RawStation, TieIn};

    fn plan_from(stations: &[SurveyStation], with_vs: bool) -> ParsedPlan {
        ParsedPlan {
            metadata: PlanMetadata::default(),
            rows: stations
                .iter()
                .map(|s| RawStation {
                    md_m: s.md_m,
                    inc_deg: s.inc_deg,
                    azi_deg: s.azi_deg,
                    tvd_m: s.tvd_m,
                    ns_m: s.ns_m,
                    ew_m: s.ew_m,
                    vs_m: with_vs.then_some(s.vs_m),
                })
                .collect(),
            skipped_rows: 0,
        }
    }

    fn sample() -> Vec<SurveyStation> {
        recalculate(
            &[
                SurveyStation::new(0.0, 0.0, 0.0),
                SurveyStation::new(500.0, 0.0, 0.0),
                SurveyStation::new(800.0, 30.0, 60.0),
                SurveyStation::new(1100.0, 30.0, 60.0),
            ],
            &TieIn::with_vsd(60.0),
        )
    }

    #[test]
    fn test_matching_plan_has_zero_deviation() {
        let computed = sample();
        let dev = compare(&plan_from(&computed, true), &computed);
        assert_eq!(dev.compared, 4);
        assert_eq!(dev.max_position_diff_m, 0.0);
        assert_eq!(dev.max_vs_diff_m, 0.0);
    }

    #[test]
    fn test_worst_row_is_reported() {
        let computed = sample();
        let mut plan = plan_from(&computed, false);
        plan.rows[2].tvd_m += 3.0;
        plan.rows[2].ew_m -= 4.0;
        plan.rows[3].ns_m += 1.0;

        let dev = compare(&plan, &computed);
        assert!((dev.max_tvd_diff_m - 3.0).abs() < 1e-9);
        assert!((dev.max_ew_diff_m - 4.0).abs() < 1e-9);
        assert!((dev.max_ns_diff_m - 1.0).abs() < 1e-9);
        assert!((dev.max_position_diff_m - 5.0).abs() < 1e-9);
        assert_eq!(dev.worst_md_m, 800.0);
        assert_eq!(dev.max_vs_diff_m, 0.0, "no VS column means no VS comparison");
    }

    #[test]
    fn test_length_mismatch_compares_prefix() {
        let computed = sample();
        let plan = plan_from(&computed[..2], true);
        assert_eq!(compare(&plan, &computed).compared, 2);
        assert_eq!(compare(&ParsedPlan::default(), &computed), PlanDeviation::default());
    }
}
