//! Well Configuration Module
//!
//! Per-well settings loaded from TOML: tie-in and vertical-section reference,
//! plan import options and the wellbore geometry snapshot.
//!
//! ## Loading Order
//!
//! 1. `WELLPATH_CONFIG` environment variable (path to TOML file)
//! 2. `well_config.toml` in the current working directory
//! 3. Built-in defaults (tie-in at the origin, no geometry)
//!
//! The trajectory and geometry engines never read configuration themselves;
//! callers turn a loaded `WellConfig` into `TieIn` / `GeometryModel` values.
//!
//! ```ignore
//! let config = WellConfig::load();
//! let tie_in = config.trajectory.tie_in(plan.metadata.vs_azimuth_deg);
//! let geometry = config.geometry.to_model();
//! ```

mod well_config;
pub mod defaults;
pub mod validation;

pub use well_config::*;
