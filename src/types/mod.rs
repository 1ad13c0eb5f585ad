//! Shared data structures for the wellbore trajectory and geometry engine
//!
//! - Survey stations and tie-in parameters (trajectory recalculation)
//! - Annulus and drill-string sections (geometry model)
//! - Raw plan rows and file metadata (plan import)

mod geometry;
mod plan;
mod survey;

pub use geometry::*;
pub use plan::*;
pub use survey::*;
