//! Delimited plan text parser

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use super::{PlanImportConfig, PlanImportError};
use crate::types::{ParsedPlan, PlanMetadata, RawStation};

/// Feet to metres
const FT_TO_M: f64 = 0.3048;

// ============================================================================
// Entry Points
// ============================================================================

/// Parse plan text with default settings.
pub fn parse_plan(source_name: &str, text: &str) -> Result<ParsedPlan, PlanImportError> {
    parse_plan_with(source_name, text, &PlanImportConfig::default())
}

/// Read and parse a plan file. The file name becomes the plan's source name.
pub fn load_plan_file(
    path: impl AsRef<Path>,
    config: &PlanImportConfig,
) -> Result<ParsedPlan, PlanImportError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| PlanImportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let source_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    parse_plan_with(&source_name, &text, config)
}

/// Parse plan text.
///
/// Rows come back sorted ascending by MD regardless of file order.
pub fn parse_plan_with(
    source_name: &str,
    text: &str,
    config: &PlanImportConfig,
) -> Result<ParsedPlan, PlanImportError> {
    let mut metadata = PlanMetadata {
        source_name: source_name.to_string(),
        vs_azimuth_deg: None,
    };
    let mut header: Option<(Delimiter, ColumnMap)> = None;
    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let is_comment =
            !config.comment_prefix.is_empty() && line.starts_with(&config.comment_prefix);
        if is_comment || header.is_none() {
            if let Some(azimuth) = parse_vs_azimuth(line) {
                metadata.vs_azimuth_deg = Some(azimuth);
                continue;
            }
        }
        if is_comment {
            continue;
        }

        let (delimiter, columns) = match header {
            Some(found) => found,
            None => {
                let delimiter = config
                    .delimiter
                    .map_or_else(|| Delimiter::detect(line), Delimiter::Char);
                let columns = ColumnMap::from_header(&delimiter.split_header(line));
                let missing = columns.missing();
                if !missing.is_empty() {
                    return Err(PlanImportError::MissingColumns {
                        source_name: source_name.to_string(),
                        missing,
                    });
                }
                header = Some((delimiter, columns));
                continue;
            }
        };

        let fields = delimiter.split(line);
        match columns.parse_row(&fields, delimiter) {
            Ok(row) => rows.push(row),
            Err(column) => {
                skipped_rows += 1;
                debug!(
                    source = source_name,
                    line = idx + 1,
                    column,
                    "Skipping plan row with unparsable value"
                );
            }
        }
    }

    if header.is_none() {
        return Err(PlanImportError::Empty(source_name.to_string()));
    }
    if rows.is_empty() {
        return Err(PlanImportError::NoDataRows(source_name.to_string()));
    }

    rows.sort_by(|a: &RawStation, b: &RawStation| a.md_m.total_cmp(&b.md_m));

    info!(
        source = source_name,
        rows = rows.len(),
        skipped = skipped_rows,
        vs_azimuth_deg = ?metadata.vs_azimuth_deg,
        "Plan imported"
    );

    Ok(ParsedPlan {
        metadata,
        rows,
        skipped_rows,
    })
}

// ============================================================================
// Metadata
// ============================================================================

fn vs_azimuth_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:vs|vertical\s+section)\s*(?:azimuth|azim|azi|az|direction|dir)\b[^0-9+\-.]*([-+]?\d+(?:\.\d+)?)",
        )
        .ok()
    })
    .as_ref()
}

/// Extract a vertical-section azimuth declaration such as `# VS Azimuth: 45.0`.
fn parse_vs_azimuth(line: &str) -> Option<f64> {
    let caps = vs_azimuth_regex()?.captures(line)?;
    caps.get(1)?.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ============================================================================
// Field Splitting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Char(char),
    Whitespace,
}

impl Delimiter {
    /// Pick the separator occurring most often in the header; whitespace if none.
    fn detect(header: &str) -> Self {
        [',', ';', '\t']
            .into_iter()
            .map(|c| (c, header.matches(c).count()))
            .filter(|&(_, n)| n > 0)
            .fold(None, |best: Option<(char, usize)>, cand| match best {
                Some(b) if b.1 >= cand.1 => Some(b),
                _ => Some(cand),
            })
            .map_or(Self::Whitespace, |(c, _)| Self::Char(c))
    }

    fn split(self, line: &str) -> Vec<String> {
        match self {
            Self::Char(c) => quoted_split(line, c),
            Self::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Like `split`, but in whitespace mode a bracketed unit token such as
    /// `(m)` is glued back onto the column name before it.
    fn split_header(self, line: &str) -> Vec<String> {
        let fields = self.split(line);
        if self != Self::Whitespace {
            return fields;
        }
        let mut merged: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields {
            match merged.last_mut() {
                Some(prev) if field.starts_with('(') || field.starts_with('[') => {
                    prev.push(' ');
                    prev.push_str(&field);
                }
                _ => merged.push(field),
            }
        }
        merged
    }
}

/// Split on `delimiter`, respecting double-quoted fields ("" escapes a quote).
fn quoted_split(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Parse one numeric cell. Blank, NaN, null, dash and non-finite values give `None`.
fn parse_number(field: &str, delimiter: Delimiter) -> Option<f64> {
    let s = field.trim().trim_matches('"').trim();
    if s.is_empty()
        || s == "-"
        || s.eq_ignore_ascii_case("nan")
        || s.eq_ignore_ascii_case("null")
    {
        return None;
    }

    // Decimal comma, only possible when comma is not the separator
    let value = if delimiter != Delimiter::Char(',') && s.contains(',') && !s.contains('.') {
        s.replace(',', ".").parse::<f64>().ok()
    } else {
        s.parse::<f64>().ok()
    };
    value.filter(|v| v.is_finite())
}

// ============================================================================
// Column Mapping
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Md,
    Inc,
    Azi,
    Tvd,
    Ns,
    Ew,
    Vs,
}

impl Column {
    const REQUIRED: [Column; 6] = [
        Column::Md,
        Column::Inc,
        Column::Azi,
        Column::Tvd,
        Column::Ns,
        Column::Ew,
    ];

    fn name(self) -> &'static str {
        match self {
            Column::Md => "md",
            Column::Inc => "inc",
            Column::Azi => "azi",
            Column::Tvd => "tvd",
            Column::Ns => "ns",
            Column::Ew => "ew",
            Column::Vs => "vs",
        }
    }

    /// Match a normalized header name against known spellings.
    fn from_name(name: &str) -> Option<Self> {
        let column = match name {
            "md" | "measured depth" | "meas depth" | "mdepth" | "depth" => Column::Md,
            "inc" | "incl" | "inclination" => Column::Inc,
            "azi" | "az" | "azim" | "azimuth" | "azi true" | "azimuth true" | "azi grid"
            | "azimuth grid" => Column::Azi,
            "tvd" | "true vertical depth" => Column::Tvd,
            "ns" | "n/s" | "+n/-s" | "n-s" | "north" | "northing" | "local n" | "dns" => Column::Ns,
            "ew" | "e/w" | "+e/-w" | "e-w" | "east" | "easting" | "local e" | "dew" => Column::Ew,
            "vs" | "vsec" | "v.s." | "vertical section" => Column::Vs,
            _ => return None,
        };
        Some(column)
    }

    /// Length columns get converted from feet; angles never do.
    fn is_length(self) -> bool {
        !matches!(self, Column::Inc | Column::Azi)
    }
}

/// Split a raw header cell into a normalized name and a to-metres factor.
///
/// `"MD (ft)"` → `("md", 0.3048)`, `"TVD_m"` → `("tvd", 1.0)`, `"Azimuth [deg]"` → `("azimuth", 1.0)`.
fn normalize_header(raw: &str) -> (String, f64) {
    let lower = raw.trim().trim_matches('"').to_lowercase();

    let mut base = String::with_capacity(lower.len());
    let mut unit = String::new();
    let mut depth = 0usize;
    for ch in lower.chars() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if depth > 0 => unit.push(c),
            c => base.push(c),
        }
    }

    let mut tokens: Vec<&str> = base
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|t| !t.is_empty())
        .collect();
    if unit.trim().is_empty() && tokens.len() > 1 {
        if let Some(&last) = tokens.last() {
            if is_unit_token(last) {
                unit = last.to_string();
                tokens.pop();
            }
        }
    }

    let factor = match unit.trim() {
        "ft" | "feet" | "usft" | "ft us" => FT_TO_M,
        _ => 1.0,
    };
    (tokens.join(" "), factor)
}

fn is_unit_token(token: &str) -> bool {
    matches!(
        token,
        "m" | "ft" | "feet" | "usft" | "deg" | "degrees" | "°"
    )
}

/// Column index and to-metres factor
type ColumnSlot = Option<(usize, f64)>;

#[derive(Debug, Clone, Copy, Default)]
struct ColumnMap {
    md: ColumnSlot,
    inc: ColumnSlot,
    azi: ColumnSlot,
    tvd: ColumnSlot,
    ns: ColumnSlot,
    ew: ColumnSlot,
    vs: ColumnSlot,
}

impl ColumnMap {
    fn from_header(fields: &[String]) -> Self {
        let mut map = Self::default();
        for (idx, field) in fields.iter().enumerate() {
            let (name, factor) = normalize_header(field);
            let Some(column) = Column::from_name(&name) else {
                continue;
            };
            let factor = if column.is_length() { factor } else { 1.0 };
            let slot = map.slot_mut(column);
            // First matching header wins
            if slot.is_none() {
                *slot = Some((idx, factor));
            }
        }
        map
    }

    fn slot(&self, column: Column) -> ColumnSlot {
        match column {
            Column::Md => self.md,
            Column::Inc => self.inc,
            Column::Azi => self.azi,
            Column::Tvd => self.tvd,
            Column::Ns => self.ns,
            Column::Ew => self.ew,
            Column::Vs => self.vs,
        }
    }

    fn slot_mut(&mut self, column: Column) -> &mut ColumnSlot {
        match column {
            Column::Md => &mut self.md,
            Column::Inc => &mut self.inc,
            Column::Azi => &mut self.azi,
            Column::Tvd => &mut self.tvd,
            Column::Ns => &mut self.ns,
            Column::Ew => &mut self.ew,
            Column::Vs => &mut self.vs,
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        Column::REQUIRED
            .into_iter()
            .filter(|&c| self.slot(c).is_none())
            .map(Column::name)
            .collect()
    }

    fn value(&self, fields: &[String], column: Column, delimiter: Delimiter) -> Option<f64> {
        let (idx, factor) = self.slot(column)?;
        parse_number(fields.get(idx)?, delimiter).map(|v| v * factor)
    }

    /// Build a row, or name the first required column that failed to parse.
    fn parse_row(
        &self,
        fields: &[String],
        delimiter: Delimiter,
    ) -> Result<RawStation, &'static str> {
        let required = |column: Column| self.value(fields, column, delimiter).ok_or(column.name());

        Ok(RawStation {
            md_m: required(Column::Md)?,
            inc_deg: required(Column::Inc)?,
            azi_deg: required(Column::Azi)?,
            tvd_m: required(Column::Tvd)?,
            ns_m: required(Column::Ns)?,
            ew_m: required(Column::Ew)?,
            vs_m: self.value(fields, Column::Vs, delimiter),
        })
    }
}
