//! System-wide default constants.
//!
//! Centralises the numbers the trajectory engine and config loader share.

// ============================================================================
// Trajectory Engine
// ============================================================================

/// Course length that dogleg severity and build/turn rates are normalised to (m).
///
/// 30 m is the metric counterpart of the 100 ft convention.
pub const DLS_COURSE_LENGTH_M: f64 = 30.0;

/// Dogleg angle below which the ratio factor is taken as exactly 1 (radians).
///
/// The closed-form ratio factor divides by the dogleg and loses precision
/// near zero; below this the tangential result is used.
pub const MIN_DOGLEG_RAD: f64 = 1e-6;

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable holding an explicit config path.
pub const CONFIG_ENV_VAR: &str = "WELLPATH_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "well_config.toml";

/// Line prefix marking comments in imported plan files.
pub const PLAN_COMMENT_PREFIX: &str = "#";
