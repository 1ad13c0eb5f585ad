//! Plan Import
//!
//! Turns delimited well-plan text into raw station rows for the trajectory
//! engine. Accepts comma, semicolon, tab or whitespace separated columns with
//! a header row; column names are matched loosely ("MD (m)", "Incl",
//! "Azimuth", "+N/-S", ...), and depth columns labelled in feet are converted
//! to metres.
//!
//! A row with an unparsable required value is skipped, never fatal. The import
//! fails only when the source is empty, the header lacks a required column, or
//! no row survives.
//!
//! # Usage
//!
//! ```ignore
//! use wellpath::import::{load_plan_file, PlanImportConfig};
//!
//! let plan = load_plan_file("plans/well-7.csv", &PlanImportConfig::default())?;
//! let stations = plan.to_stations();
//! ```

mod plan_parser;

pub use plan_parser::{load_plan_file, parse_plan, parse_plan_with};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::defaults::PLAN_COMMENT_PREFIX;

/// Plan import failures
#[derive(Debug, Error)]
pub enum PlanImportError {
    #[error("plan '{0}' is empty")]
    Empty(String),

    #[error("plan '{source_name}' is missing required columns: {}", missing.join(", "))]
    MissingColumns {
        source_name: String,
        missing: Vec<&'static str>,
    },

    #[error("plan '{0}' has no usable data rows")]
    NoDataRows(String),

    #[error("failed to read plan {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parser behaviour knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanImportConfig {
    /// Force a column delimiter instead of detecting it from the header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    /// Lines starting with this prefix are comments (metadata may live there)
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

fn default_comment_prefix() -> String {
    PLAN_COMMENT_PREFIX.to_string()
}

impl Default for PlanImportConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            comment_prefix: default_comment_prefix(),
        }
    }
}
