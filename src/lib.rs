//! wellpath: Wellbore Trajectory Engine
//!
//! Recomputes well trajectories from survey stations and answers wellbore
//! geometry questions by depth.
//!
//! ## Architecture
//!
//! - **Trajectory**: Minimum-curvature solver and the station recalculator
//!   (TVD, NS/EW, vertical section, DLS, build/turn rates, subsea depth)
//! - **Geometry**: Hole and drill-string diameters and areas at any MD
//! - **Import**: Delimited well-plan text into raw station rows
//! - **Config**: TOML well configuration (tie-in, import, geometry)

pub mod config;
pub mod geometry;
pub mod import;
pub mod trajectory;
pub mod types;

// Re-export well configuration
pub use config::WellConfig;

// Re-export commonly used types
pub use types::{
    AnnulusSection, DepthInterval, DrillStringSection, ParsedPlan, PlanMetadata, RawStation,
    SurveyStation, TieIn,
};

// Re-export engine entry points
pub use geometry::GeometryModel;
pub use import::{load_plan_file, parse_plan, PlanImportConfig, PlanImportError};
pub use trajectory::{minimum_curvature, recalculate, recalculate_in_place, summarize};
