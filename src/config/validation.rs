//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, "; did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for WellConfig.
///
/// Keys inside `[[geometry.annulus]]` / `[[geometry.drill_string]]` entries
/// appear under the array's own path. Any new field added to WellConfig
/// must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well]
        "well",
        "well.name",
        "well.field",
        "well.rig",
        // [trajectory]
        "trajectory",
        "trajectory.vsd_direction_deg",
        "trajectory.kb_elevation_m",
        "trajectory.tie_in_ns_m",
        "trajectory.tie_in_ew_m",
        "trajectory.tie_in_tvd_m",
        // [import]
        "import",
        "import.delimiter",
        "import.comment_prefix",
        // [geometry]
        "geometry",
        "geometry.current_string_bottom_md_m",
        "geometry.annulus",
        "geometry.annulus.top_depth_m",
        "geometry.annulus.bottom_depth_m",
        "geometry.annulus.inner_diameter_m",
        "geometry.drill_string",
        "geometry.drill_string.top_depth_m",
        "geometry.drill_string.bottom_depth_m",
        "geometry.drill_string.outer_diameter_m",
        "geometry.drill_string.inner_diameter_m",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`. Tables inside arrays are walked under the array's
/// path, so `[[a.list]] x = 1` yields `["a", "a.list", "a.list.x"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        for key in walk_toml_keys(item, &path) {
                            if !keys.contains(&key) {
                                keys.push(key);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Largest hole diameter considered plausible (m); 1.5 m is beyond any conductor.
const MAX_PLAUSIBLE_HOLE_DIAMETER_M: f64 = 1.5;

/// KB elevation magnitude considered plausible (m).
const MAX_PLAUSIBLE_KB_ELEVATION_M: f64 = 9_000.0;

/// Validate physical ranges on a parsed WellConfig.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// be rejected; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::WellConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let g = &config.geometry;

    for (i, s) in g.annulus.iter().enumerate() {
        if s.inner_diameter_m < 0.0 {
            errors.push(format!(
                "geometry.annulus[{i}].inner_diameter_m = {:.4} cannot be negative",
                s.inner_diameter_m
            ));
        } else if s.inner_diameter_m > MAX_PLAUSIBLE_HOLE_DIAMETER_M {
            warnings.push(ValidationWarning {
                field: format!("geometry.annulus[{i}].inner_diameter_m"),
                message: format!(
                    "annulus[{i}] inner_diameter_m = {:.3} is larger than any drilled hole, value in inches?",
                    s.inner_diameter_m
                ),
                suggestion: None,
            });
        }
    }

    for (i, s) in g.drill_string.iter().enumerate() {
        let diameters = [
            ("outer_diameter_m", s.outer_diameter_m),
            ("inner_diameter_m", s.inner_diameter_m),
        ];
        for (name, d) in diameters {
            if d < 0.0 {
                errors.push(format!(
                    "geometry.drill_string[{i}].{name} = {d:.4} cannot be negative"
                ));
            }
        }
    }

    // Pipe below the deepest hole data reads as an empty hole
    let deepest_hole = g
        .annulus
        .iter()
        .map(|s| s.bottom_depth_m)
        .fold(f64::NEG_INFINITY, f64::max);
    if !g.annulus.is_empty() && g.current_string_bottom_md_m > deepest_hole {
        warnings.push(ValidationWarning {
            field: "geometry.current_string_bottom_md_m".to_string(),
            message: format!(
                "current_string_bottom_md_m = {:.1} is below the deepest annulus section ({:.1})",
                g.current_string_bottom_md_m, deepest_hole
            ),
            suggestion: None,
        });
    }

    if let Some(kb) = config.trajectory.kb_elevation_m {
        if kb.abs() > MAX_PLAUSIBLE_KB_ELEVATION_M {
            warnings.push(ValidationWarning {
                field: "trajectory.kb_elevation_m".to_string(),
                message: format!(
                    "kb_elevation_m = {kb:.1} is outside typical range (±{MAX_PLAUSIBLE_KB_ELEVATION_M:.0} m)"
                ),
                suggestion: None,
            });
        }
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnnulusSection, DrillStringSection};

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("kb_elevaton_m", "kb_elevation_m"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [trajectory]
            vsd_direction_deg = 45.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"trajectory".to_string()));
        assert!(keys.contains(&"trajectory.vsd_direction_deg".to_string()));
    }

    #[test]
    fn test_walk_toml_keys_array_of_tables() {
        let toml: toml::Value = r#"
            [[geometry.annulus]]
            top_depth_m = 0.0
            [[geometry.annulus]]
            top_depth_m = 500.0
            bottom_depht_m = 900.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"geometry.annulus".to_string()));
        assert!(keys.contains(&"geometry.annulus.top_depth_m".to_string()));
        assert!(keys.contains(&"geometry.annulus.bottom_depht_m".to_string()));
        let dupes = keys.iter().filter(|k| *k == "geometry.annulus.top_depth_m").count();
        assert_eq!(dupes, 1);
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[trajectory]
kb_elevaton_m = 30.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("trajectory.kb_elevation_m")
        );
    }

    #[test]
    fn test_typo_inside_section_array() {
        let toml_str = r#"
[[geometry.drill_string]]
top_depth_m = 0.0
bottom_depth_m = 900.0
outer_diamter_m = 0.127
inner_diameter_m = 0.1086
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("geometry.drill_string.outer_diameter_m")
        );
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_physical_range_defaults_clean() {
        let config = crate::config::WellConfig::default();
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty(), "Defaults should produce no errors: {:?}", errors);
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {:?}", warnings);
    }

    #[test]
    fn test_hole_diameter_in_inches_warns() {
        let mut config = crate::config::WellConfig::default();
        config.geometry.annulus.push(AnnulusSection {
            top_depth_m: 0.0,
            bottom_depth_m: 1000.0,
            inner_diameter_m: 8.5,
        });
        config.geometry.current_string_bottom_md_m = 500.0;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field.contains("inner_diameter_m")));
    }

    #[test]
    fn test_negative_pipe_diameter_is_error() {
        let mut config = crate::config::WellConfig::default();
        config.geometry.drill_string.push(DrillStringSection {
            top_depth_m: 0.0,
            bottom_depth_m: 100.0,
            outer_diameter_m: -0.127,
            inner_diameter_m: -0.2,
        });
        let (errors, _) = validate_physical_ranges(&config);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_string_below_hole_data_warns() {
        let mut config = crate::config::WellConfig::default();
        config.geometry.annulus.push(AnnulusSection {
            top_depth_m: 0.0,
            bottom_depth_m: 1000.0,
            inner_diameter_m: 0.2159,
        });
        config.geometry.current_string_bottom_md_m = 1200.0;
        let (_, warnings) = validate_physical_ranges(&config);
        assert!(warnings.iter().any(|w| w.field == "geometry.current_string_bottom_md_m"));
    }
}
