//! Config Validation Tests
//!
//! Typo detection and range validation for `well_config.toml`, exercised
//! independently from the trajectory and geometry engine.

use std::io::Write;

use wellpath::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use wellpath::config::{ConfigError, WellConfig};
use wellpath::types::{AnnulusSection, DrillStringSection};

const FULL_CONFIG: &str = r#"
[well]
name = "Endeavour-7"
field = "North Sea"
rig = "Maersk Invincible"

[trajectory]
vsd_direction_deg = 212.5
kb_elevation_m = 25.0
tie_in_ns_m = 0.0
tie_in_ew_m = 0.0
tie_in_tvd_m = 0.0

[import]
delimiter = ","
comment_prefix = "//"

[geometry]
current_string_bottom_md_m = 1800.0

[[geometry.annulus]]
top_depth_m = 0.0
bottom_depth_m = 1200.0
inner_diameter_m = 0.3153

[[geometry.annulus]]
top_depth_m = 1200.0
bottom_depth_m = 2500.0
inner_diameter_m = 0.2159

[[geometry.drill_string]]
top_depth_m = 0.0
bottom_depth_m = 1650.0
outer_diameter_m = 0.127
inner_diameter_m = 0.1086

[[geometry.drill_string]]
top_depth_m = 1650.0
bottom_depth_m = 1800.0
outer_diameter_m = 0.1651
inner_diameter_m = 0.0714
"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_trajectory_section_warns_with_suggestion() {
    let toml_str = r#"
[trajectory]
vsd_directon_deg = 45.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("vsd_directon_deg"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("trajectory.vsd_direction_deg"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn typo_in_well_section_warns() {
    let toml_str = r#"
[well]
naem = "Test-Well"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    // "naem" is distance 2 from "name"
    assert_eq!(warnings[0].suggestion.as_deref(), Some("well.name"));
}

#[test]
fn typo_inside_annulus_entry_warns() {
    let toml_str = r#"
[[geometry.annulus]]
top_depth_m = 0.0
bottom_depth_m = 100.0
inner_diamater_m = 0.3
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("geometry.annulus.inner_diameter_m")
    );
}

#[test]
fn valid_config_produces_zero_warnings() {
    let warnings = validate_unknown_keys(FULL_CONFIG);
    assert!(
        warnings.is_empty(),
        "Valid config should produce 0 warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );
}

#[test]
fn unknown_section_warns() {
    let toml_str = r#"
[thresholds]
some_field = 42
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 2, "Section and its key should both warn");
    assert!(warnings.iter().any(|w| w.field == "thresholds"));
}

#[test]
fn malformed_toml_is_left_to_serde() {
    assert!(validate_unknown_keys("[trajectory\nvsd = ").is_empty());
}

#[test]
fn every_known_key_round_trips_through_suggestion() {
    let known = known_config_keys();
    for key in &known {
        assert_eq!(suggest_correction(key, &known).as_deref(), Some(*key));
    }
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn full_config_loads_and_validates() {
    let file = write_config(FULL_CONFIG);
    let config = WellConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.well.name, "Endeavour-7");
    assert_eq!(config.trajectory.vsd_direction_deg, Some(212.5));
    assert_eq!(config.import.delimiter, Some(','));
    assert_eq!(config.import.comment_prefix, "//");
    assert_eq!(config.geometry.drill_string.len(), 2);

    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty(), "{errors:?}");
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let file = write_config("[well]\nname = \"Solo\"\n");
    let config = WellConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.well.name, "Solo");
    assert_eq!(config.trajectory, WellConfig::default().trajectory);
    assert_eq!(config.import.comment_prefix, "#");
    assert!(config.geometry.annulus.is_empty());
}

#[test]
fn out_of_range_vsd_is_rejected() {
    let file = write_config("[trajectory]\nvsd_direction_deg = 400.0\n");
    match WellConfig::load_from_file(file.path()) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("vsd_direction_deg")));
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn inverted_drill_string_section_is_rejected() {
    let mut config = WellConfig::default();
    config.geometry.drill_string.push(DrillStringSection {
        top_depth_m: 900.0,
        bottom_depth_m: 100.0,
        outer_diameter_m: 0.127,
        inner_diameter_m: 0.1086,
    });
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn pipe_id_larger_than_od_is_rejected() {
    let mut config = WellConfig::default();
    config.geometry.drill_string.push(DrillStringSection {
        top_depth_m: 0.0,
        bottom_depth_m: 100.0,
        outer_diameter_m: 0.1,
        inner_diameter_m: 0.2,
    });
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("inner_diameter_m"));
}

#[test]
fn negative_hole_diameter_is_rejected() {
    let mut config = WellConfig::default();
    config.geometry.annulus.push(AnnulusSection {
        top_depth_m: 0.0,
        bottom_depth_m: 100.0,
        inner_diameter_m: -0.2,
    });
    assert!(config.validate().is_err());
}

#[test]
fn implausible_kb_only_warns() {
    let mut config = WellConfig::default();
    config.trajectory.kb_elevation_m = Some(12_000.0);
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "trajectory.kb_elevation_m");
    assert!(config.validate().is_ok(), "Warnings must not fail validation");
}

#[test]
fn parse_error_names_the_file() {
    let file = write_config("[geometry]\ncurrent_string_bottom_md_m = \"deep\"\n");
    let err = WellConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn saved_config_reloads_identically() {
    let file = write_config(FULL_CONFIG);
    let config = WellConfig::load_from_file(file.path()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("well_config.toml");
    config.save_to_file(&out).unwrap();
    let reloaded = WellConfig::load_from_file(&out).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn unknown_keys_are_returned_once_from_file_load() {
    let file = write_config(
        r#"
[trajectory]
kb_elevaton_m = 30.0

[[geometry.annulus]]
top_depth_m = 0.0
bottom_depth_m = 500.0
inner_diameter_m = 0.3
notes = "x"
"#,
    );
    let (config, warnings) = WellConfig::load_from_file_with_warnings(file.path()).unwrap();

    assert_eq!(config.geometry.annulus.len(), 1);
    let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();
    assert_eq!(fields.len(), 2, "one warning per unknown key: {fields:?}");
    assert!(fields.contains(&"trajectory.kb_elevaton_m"));
    assert!(fields.contains(&"geometry.annulus.notes"));
}

#[test]
fn known_keys_give_no_warnings_from_file_load() {
    let file = write_config(FULL_CONFIG);
    let (_, warnings) = WellConfig::load_from_file_with_warnings(file.path()).unwrap();
    assert!(warnings.is_empty());
}
