//! wellpath - Wellbore Trajectory Engine
//!
//! Recalculates an imported well plan with the minimum-curvature method and
//! evaluates the configured wellbore geometry by depth.
//!
//! # Usage
//!
//! ```bash
//! # Recalculate a plan and print the station table
//! wellpath survey --plan plans/well-7.csv
//!
//! # Override the vertical-section azimuth and KB elevation, emit JSON
//! wellpath survey --plan plans/well-7.csv --vsd 135 --kb 32.5 --json
//!
//! # Query the geometry model from well_config.toml
//! wellpath geometry --depth 500 --depth 950
//!
//! # Validate a config file
//! wellpath check-config --path well_config.toml
//! ```
//!
//! # Environment Variables
//!
//! - `WELLPATH_CONFIG`: Path to the well config (default: ./well_config.toml)
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use wellpath::config::{self, WellConfig};
use wellpath::import::load_plan_file;
use wellpath::trajectory::{self, PlanDeviation, TrajectorySummary};
use wellpath::types::SurveyStation;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wellpath")]
#[command(about = "Wellbore trajectory recalculation and geometry queries")]
#[command(version)]
struct CliArgs {
    /// Well config file. Overrides $WELLPATH_CONFIG and ./well_config.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Import a plan file and recalculate its trajectory
    Survey {
        /// Delimited plan file (CSV, semicolon, tab or whitespace separated)
        #[arg(long, value_name = "FILE")]
        plan: PathBuf,
        /// Vertical-section azimuth in degrees
        #[arg(long, value_name = "DEG")]
        vsd: Option<f64>,
        /// KB elevation above sea level in metres
        #[arg(long, value_name = "M")]
        kb: Option<f64>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the configured geometry model at one or more depths
    Geometry {
        /// Measured depth in metres (repeatable)
        #[arg(long = "depth", value_name = "M", required = true)]
        depths: Vec<f64>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Load and validate a well config file
    CheckConfig {
        /// Config file to check (default: the normal search order)
        #[arg(long, value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    match args.command {
        SubCommand::Survey { plan, vsd, kb, json } => {
            let config = load_config(args.config.as_deref())?;
            run_survey(&config, &plan, vsd, kb, json)
        }
        SubCommand::Geometry { depths, json } => {
            let config = load_config(args.config.as_deref())?;
            run_geometry(&config, &depths, json)
        }
        SubCommand::CheckConfig { path } => run_check_config(path.or(args.config).as_deref()),
    }
}

/// Explicit path: must load. Otherwise the usual search with fallback.
fn load_config(path: Option<&Path>) -> Result<WellConfig> {
    match path {
        Some(p) => WellConfig::load_from_file(p)
            .with_context(|| format!("Failed to load well config {}", p.display())),
        None => Ok(WellConfig::load()),
    }
}

// ============================================================================
// survey
// ============================================================================

#[derive(Serialize)]
struct SurveyReport<'a> {
    well: &'a str,
    source: &'a str,
    vsd_direction_deg: f64,
    stations: &'a [SurveyStation],
    summary: TrajectorySummary,
    plan_deviation: PlanDeviation,
}

fn run_survey(
    config: &WellConfig,
    plan_path: &Path,
    vsd: Option<f64>,
    kb: Option<f64>,
    json: bool,
) -> Result<()> {
    let plan = load_plan_file(plan_path, &config.import)
        .with_context(|| format!("Failed to import plan {}", plan_path.display()))?;

    let mut tie_in = config.trajectory.tie_in(plan.metadata.vs_azimuth_deg);
    if let Some(vsd) = vsd {
        tie_in.vsd_direction_deg = vsd;
    }
    if kb.is_some() {
        tie_in.kb_elevation_m = kb;
    }

    let stations = trajectory::recalculate(&plan.to_stations(), &tie_in);
    let summary = trajectory::summarize(&stations);
    let deviation = trajectory::compare_to_plan(&plan, &stations);

    info!(
        well = %config.well.name,
        source = %plan.metadata.source_name,
        stations = stations.len(),
        skipped = plan.skipped_rows,
        vsd_deg = tie_in.vsd_direction_deg,
        "Trajectory recalculated"
    );

    if json {
        let report = SurveyReport {
            well: &config.well.name,
            source: &plan.metadata.source_name,
            vsd_direction_deg: tie_in.vsd_direction_deg,
            stations: &stations,
            summary,
            plan_deviation: deviation,
        };
        let out = serde_json::to_string_pretty(&report)
            .context("Failed to serialize survey report")?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "{:>10} {:>7} {:>8} {:>10} {:>10} {:>10} {:>10} {:>7} {:>7} {:>8} {:>10}",
        "MD", "Inc", "Azi", "TVD", "NS", "EW", "VS", "DLS", "Build", "Turn", "Subsea"
    );
    for s in &stations {
        let subsea = s
            .subsea_m
            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        println!(
            "{:>10.2} {:>7.2} {:>8.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>7.2} {:>7.2} {:>8.2} {:>10}",
            s.md_m,
            s.inc_deg,
            s.azi_deg,
            s.tvd_m,
            s.ns_m,
            s.ew_m,
            s.vs_m,
            s.dls_deg_per_30m,
            s.build_rate_deg_per_30m,
            s.turn_rate_deg_per_30m,
            subsea
        );
    }

    println!();
    println!("Stations:        {}", summary.station_count);
    println!(
        "TD:              {:.2} m MD / {:.2} m TVD",
        summary.td_md_m, summary.td_tvd_m
    );
    println!("Max inclination: {:.2} deg", summary.max_inc_deg);
    println!(
        "Max DLS:         {:.2} deg/30m at {:.2} m",
        summary.max_dls_deg_per_30m, summary.max_dls_md_m
    );
    println!(
        "Closure:         {:.2} m @ {:.2} deg",
        summary.closure_distance_m, summary.closure_azimuth_deg
    );

    if deviation.compared > 0 {
        println!();
        println!("Plan check ({} rows):", deviation.compared);
        println!("  max |dTVD|: {:.3} m", deviation.max_tvd_diff_m);
        println!("  max |dNS|:  {:.3} m", deviation.max_ns_diff_m);
        println!("  max |dEW|:  {:.3} m", deviation.max_ew_diff_m);
        println!("  max |dVS|:  {:.3} m", deviation.max_vs_diff_m);
        println!(
            "  worst 3-D:  {:.3} m at {:.2} m MD",
            deviation.max_position_diff_m, deviation.worst_md_m
        );
    }

    Ok(())
}

// ============================================================================
// geometry
// ============================================================================

#[derive(Serialize)]
struct GeometryRow {
    md_m: f64,
    hole_diameter_m: f64,
    pipe_outer_diameter_m: f64,
    pipe_inner_diameter_m: f64,
    annulus_gap_m: f64,
    annulus_flow_area_m2: f64,
    pipe_bore_area_m2: f64,
    pipe_metal_area_m2: f64,
}

fn run_geometry(config: &WellConfig, depths: &[f64], json: bool) -> Result<()> {
    let model = config.geometry.to_model();
    if model.annulus_sections().is_empty() {
        warn!("No annulus sections configured; hole diameters will read as 0");
    }

    let rows: Vec<GeometryRow> = depths
        .iter()
        .map(|&md| GeometryRow {
            md_m: md,
            hole_diameter_m: model.hole_diameter_m(md),
            pipe_outer_diameter_m: model.pipe_outer_diameter_m(md),
            pipe_inner_diameter_m: model.pipe_inner_diameter_m(md),
            annulus_gap_m: model.annulus_gap_m(md),
            annulus_flow_area_m2: model.annulus_flow_area_m2(md),
            pipe_bore_area_m2: model.pipe_bore_area_m2(md),
            pipe_metal_area_m2: model.pipe_metal_area_m2(md),
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&rows)
            .context("Failed to serialize geometry rows")?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "{:>10} {:>8} {:>8} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "MD", "Hole", "OD", "ID", "Gap", "AnnArea", "BoreArea", "MetalArea"
    );
    for r in &rows {
        println!(
            "{:>10.2} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>10.5} {:>10.5} {:>10.5}",
            r.md_m,
            r.hole_diameter_m,
            r.pipe_outer_diameter_m,
            r.pipe_inner_diameter_m,
            r.annulus_gap_m,
            r.annulus_flow_area_m2,
            r.pipe_bore_area_m2,
            r.pipe_metal_area_m2
        );
    }

    for o in model.overlaps() {
        println!(
            "note: {} sections {} and {} overlap over {:.2}-{:.2} m; the shallower one wins",
            o.kind, o.first, o.second, o.overlap_top_m, o.overlap_bottom_m
        );
    }

    Ok(())
}

// ============================================================================
// check-config
// ============================================================================

fn run_check_config(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::var(config::defaults::CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(config::defaults::CONFIG_FILE_NAME)),
    };

    let (cfg, unknown) = WellConfig::load_from_file_with_warnings(&path)
        .with_context(|| format!("Invalid well config {}", path.display()))?;
    for w in &unknown {
        println!("warning: {w}");
    }

    println!(
        "{}: OK (well '{}', {} annulus / {} drill-string sections, {} warning(s))",
        path.display(),
        cfg.well.name,
        cfg.geometry.annulus.len(),
        cfg.geometry.drill_string.len(),
        unknown.len()
    );
    Ok(())
}
