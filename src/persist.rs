//! Output persistence: tabular, spreadsheet, and structured formats plus the
//! text report.
//!
//! All outputs share a caller-supplied base path and differ by extension.
//! Directory creation is idempotent; file writes assume exclusive ownership
//! of their targets, and a failed write propagates without cleanup.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use serde::Serialize;
use tracing::{info, instrument};

use crate::analyzers::{AnalysisResult, StatsTable};
use crate::error::Result;
use crate::report::render_report;

/// The kind of output file written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Csv,
    Excel,
    Json,
    Report,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputKind::Csv => "csv",
            OutputKind::Excel => "excel",
            OutputKind::Json => "json",
            OutputKind::Report => "report",
        };
        write!(f, "{name}")
    }
}

/// The files written by one persistence call, keyed by output kind.
///
/// Built by [`save_results`], returned to the caller, never mutated
/// afterward.
#[derive(Debug, Clone, Default)]
pub struct SavedFiles {
    files: BTreeMap<OutputKind, PathBuf>,
}

impl SavedFiles {
    fn insert(&mut self, kind: OutputKind, path: PathBuf) {
        self.files.insert(kind, path);
    }

    /// The path written for a given kind, if any.
    pub fn get(&self, kind: OutputKind) -> Option<&Path> {
        self.files.get(&kind).map(PathBuf::as_path)
    }

    /// Iterates over `(kind, path)` pairs in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (OutputKind, &Path)> {
        self.files.iter().map(|(k, p)| (*k, p.as_path()))
    }

    /// Number of files written.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// What to persist: either a bare statistics table or a full analysis
/// result.
#[derive(Debug, Clone, Copy)]
pub enum SaveInput<'a> {
    /// A row-indexed statistics table, written as CSV and spreadsheet.
    Stats(&'a StatsTable),
    /// A full analysis result, written as CSV (the embedded statistics
    /// table, when present), JSON, and optionally the text report.
    Analysis(&'a AnalysisResult),
}

impl<'a> From<&'a StatsTable> for SaveInput<'a> {
    fn from(stats: &'a StatsTable) -> Self {
        SaveInput::Stats(stats)
    }
}

impl<'a> From<&'a AnalysisResult> for SaveInput<'a> {
    fn from(result: &'a AnalysisResult) -> Self {
        SaveInput::Analysis(result)
    }
}

/// Creates each of the given directories, idempotently.
pub fn setup_directories<P: AsRef<Path>>(dirs: &[P]) -> Result<()> {
    for dir in dirs {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Persists `input` under `base_path` (a trailing extension is stripped),
/// creating the destination directory if needed. Returns the mapping of
/// every file kind actually written to its path.
#[instrument(skip(input, base_path), fields(base = %base_path.as_ref().display()))]
pub fn save_results(
    input: SaveInput<'_>,
    base_path: impl AsRef<Path>,
    include_report: bool,
) -> Result<SavedFiles> {
    let base = base_path.as_ref().with_extension("");
    if let Some(parent) = base.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut saved = SavedFiles::default();
    match input {
        SaveInput::Stats(stats) => {
            let csv_path = base.with_extension("csv");
            write_stats_csv(stats, &csv_path)?;
            saved.insert(OutputKind::Csv, csv_path);

            let xlsx_path = base.with_extension("xlsx");
            write_stats_xlsx(stats, &xlsx_path)?;
            saved.insert(OutputKind::Excel, xlsx_path);
        }
        SaveInput::Analysis(result) => {
            if let Some(stats) = &result.basic_stats {
                let csv_path = base.with_extension("csv");
                write_stats_csv(stats, &csv_path)?;
                saved.insert(OutputKind::Csv, csv_path);
            }

            let json_path = base.with_extension("json");
            fs::write(&json_path, serde_json::to_string_pretty(result)?)?;
            saved.insert(OutputKind::Json, json_path);

            if include_report {
                let report_path = report_path_for(&base);
                fs::write(&report_path, render_report(result))?;
                saved.insert(OutputKind::Report, report_path);
            }
        }
    }

    info!(files = saved.len(), "results saved");
    Ok(saved)
}

fn report_path_for(base: &Path) -> PathBuf {
    let stem = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    base.with_file_name(format!("{stem}_report.txt"))
}

/// Writes a row-indexed CSV: empty first header cell, then column names; one
/// row per index label. NaN cells are written empty.
fn write_stats_csv(stats: &StatsTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![String::new()];
    header.extend(stats.columns.iter().cloned());
    writer.write_record(&header)?;

    for (label, row) in stats.index.iter().zip(stats.values.iter()) {
        let mut record = vec![label.clone()];
        record.extend(row.iter().map(|v| format_cell(*v)));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the same row-indexed layout to a single-worksheet spreadsheet.
fn write_stats_xlsx(stats: &StatsTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in stats.columns.iter().enumerate() {
        worksheet.write_string(0, (col + 1) as u16, name.as_str())?;
    }
    for (row, (label, values)) in stats.index.iter().zip(stats.values.iter()).enumerate() {
        worksheet.write_string((row + 1) as u32, 0, label.as_str())?;
        for (col, value) in values.iter().enumerate() {
            if value.is_finite() {
                worksheet.write_number((row + 1) as u32, (col + 1) as u16, *value)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn format_cell(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}
