//! Well Configuration - tie-in, import and geometry settings as TOML values
//!
//! Each struct implements `Default`, so a missing file or section behaves
//! like a tie-in at the origin with no geometry.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults::{CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use super::validation::ValidationWarning;
use crate::geometry::GeometryModel;
use crate::import::PlanImportConfig;
use crate::types::{AnnulusSection, DrillStringSection, TieIn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one well.
///
/// Load with `WellConfig::load()` which searches:
/// 1. `$WELLPATH_CONFIG` env var
/// 2. `./well_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellConfig {
    /// Well / rig identification
    #[serde(default)]
    pub well: WellInfo,

    /// Tie-in point and vertical-section reference
    #[serde(default)]
    pub trajectory: TrajectoryConfig,

    /// Plan file parsing options
    #[serde(default)]
    pub import: PlanImportConfig,

    /// Annulus / drill-string sections and current string depth
    #[serde(default)]
    pub geometry: GeometryConfig,
}

impl WellConfig {
    /// Load configuration using the standard search order:
    /// 1. `$WELLPATH_CONFIG` environment variable
    /// 2. `./well_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(
                            path = %p.display(),
                            well = %config.well.name,
                            "Loaded well config from {CONFIG_ENV_VAR}"
                        );
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from {CONFIG_ENV_VAR}, falling back"
                        );
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        // 2. Check ./well_config.toml
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(well = %config.well.name, "Loaded well config from ./{CONFIG_FILE_NAME}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{CONFIG_FILE_NAME}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {CONFIG_FILE_NAME} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys only produce warnings; structural problems are errors.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let (config, unknown_keys) = Self::load_from_file_with_warnings(path)?;
        for w in &unknown_keys {
            warn!("{}", w);
        }
        Ok(config)
    }

    /// Like [`load_from_file`](Self::load_from_file), but hands the
    /// unknown-key warnings back to the caller instead of logging them.
    pub fn load_from_file_with_warnings(
        path: &Path,
    ) -> Result<(Self, Vec<ValidationWarning>), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let unknown_keys = super::validation::validate_unknown_keys(&contents);

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok((config, unknown_keys))
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Well config saved");
        Ok(())
    }

    /// Validate values for internal consistency.
    ///
    /// Rules:
    /// - Every number must be finite
    /// - Vertical-section azimuth within [0, 360]
    /// - Section bottoms at or below their tops
    /// - Drill-string ID no larger than OD
    /// - String bottom depth not negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let t = &self.trajectory;
        Self::check_finite(t.tie_in_ns_m, "trajectory.tie_in_ns_m", &mut errors);
        Self::check_finite(t.tie_in_ew_m, "trajectory.tie_in_ew_m", &mut errors);
        Self::check_finite(t.tie_in_tvd_m, "trajectory.tie_in_tvd_m", &mut errors);
        if let Some(kb) = t.kb_elevation_m {
            Self::check_finite(kb, "trajectory.kb_elevation_m", &mut errors);
        }
        if let Some(vsd) = t.vsd_direction_deg {
            if !(0.0..=360.0).contains(&vsd) {
                errors.push(format!(
                    "trajectory.vsd_direction_deg = {vsd} must be within 0-360 degrees"
                ));
            }
        }

        let g = &self.geometry;
        Self::check_finite(
            g.current_string_bottom_md_m,
            "geometry.current_string_bottom_md_m",
            &mut errors,
        );
        if g.current_string_bottom_md_m < 0.0 {
            errors.push(format!(
                "geometry.current_string_bottom_md_m = {:.2} cannot be negative",
                g.current_string_bottom_md_m
            ));
        }

        for (i, s) in g.annulus.iter().enumerate() {
            let name = format!("geometry.annulus[{i}]");
            Self::check_interval(s.top_depth_m, s.bottom_depth_m, &name, &mut errors);
            let id_name = format!("{name}.inner_diameter_m");
            Self::check_finite(s.inner_diameter_m, &id_name, &mut errors);
        }

        for (i, s) in g.drill_string.iter().enumerate() {
            let name = format!("geometry.drill_string[{i}]");
            Self::check_interval(s.top_depth_m, s.bottom_depth_m, &name, &mut errors);
            let od_name = format!("{name}.outer_diameter_m");
            let id_name = format!("{name}.inner_diameter_m");
            Self::check_finite(s.outer_diameter_m, &od_name, &mut errors);
            Self::check_finite(s.inner_diameter_m, &id_name, &mut errors);
            if s.inner_diameter_m > s.outer_diameter_m {
                errors.push(format!(
                    "{name}: inner_diameter_m ({:.4}) must not exceed outer_diameter_m ({:.4})",
                    s.inner_diameter_m, s.outer_diameter_m
                ));
            }
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_finite(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
        }
    }

    fn check_interval(top: f64, bottom: f64, name: &str, errors: &mut Vec<String>) {
        if !top.is_finite() || !bottom.is_finite() {
            errors.push(format!(
                "{name}: depths must be finite (got top={top}, bottom={bottom})"
            ));
            return;
        }
        if bottom < top {
            errors.push(format!(
                "{name}: bottom_depth_m ({bottom:.2}) must be >= top_depth_m ({top:.2})"
            ));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Well Info
// ============================================================================

/// Identification metadata. Not used for logic; appears in logs and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellInfo {
    /// Well name / identifier
    #[serde(default = "default_well_name")]
    pub name: String,

    /// Field name
    #[serde(default)]
    pub field: String,

    /// Rig name
    #[serde(default)]
    pub rig: String,
}

fn default_well_name() -> String {
    "DEFAULT".to_string()
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            field: String::new(),
            rig: String::new(),
        }
    }
}

// ============================================================================
// Trajectory
// ============================================================================

/// Tie-in and reference values for trajectory recalculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Vertical-section azimuth (degrees). When unset, the plan's declared
    /// azimuth is used, then 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vsd_direction_deg: Option<f64>,

    /// Reference elevation above sea level for subsea depths (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kb_elevation_m: Option<f64>,

    #[serde(default)]
    pub tie_in_ns_m: f64,

    #[serde(default)]
    pub tie_in_ew_m: f64,

    #[serde(default)]
    pub tie_in_tvd_m: f64,
}

impl TrajectoryConfig {
    /// Build the tie-in for a pass, falling back to `plan_vs_azimuth_deg`
    /// when no azimuth is configured.
    pub fn tie_in(&self, plan_vs_azimuth_deg: Option<f64>) -> TieIn {
        TieIn {
            vsd_direction_deg: self
                .vsd_direction_deg
                .or(plan_vs_azimuth_deg)
                .unwrap_or(0.0),
            kb_elevation_m: self.kb_elevation_m,
            ns_m: self.tie_in_ns_m,
            ew_m: self.tie_in_ew_m,
            tvd_m: self.tie_in_tvd_m,
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Wellbore geometry snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Deepest MD the drill string currently reaches (m)
    #[serde(default)]
    pub current_string_bottom_md_m: f64,

    #[serde(default)]
    pub annulus: Vec<AnnulusSection>,

    #[serde(default)]
    pub drill_string: Vec<DrillStringSection>,
}

impl GeometryConfig {
    pub fn to_model(&self) -> GeometryModel {
        GeometryModel::new(
            self.annulus.clone(),
            self.drill_string.clone(),
            self.current_string_bottom_md_m,
        )
    }
}
