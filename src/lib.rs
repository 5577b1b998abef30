//! # tabsift - Batch Tabular Analysis
//!
//! tabsift is a small batch pipeline that loads a tabular dataset from a
//! delimited file, validates its shape and required columns, cleans it
//! (missing-value handling, de-duplication, text normalization), computes
//! descriptive statistics, and persists the results in multiple output
//! formats alongside a human-readable report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tabsift::prelude::*;
//!
//! # fn example() -> tabsift::error::Result<()> {
//! let table = CsvSource::new("data/example.csv").load()?;
//! let table = validate(table, None)?;
//! let clean = preprocess(&table, &PreprocessOptions::default());
//! let result = analyze(&clean, &AnalysisOptions::default());
//!
//! let saved = save_results(SaveInput::Analysis(&result), "output/results", true)?;
//! print_summary(&result);
//!
//! for (kind, path) in saved.iter() {
//!     println!("{kind}: {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! Data flows strictly left to right:
//!
//! ```text
//! sources -> validate -> preprocess -> analyzers -> { report, persist }
//! ```
//!
//! - [`sources`]: reads a delimited file into an in-memory [`table::Table`]
//!   with per-column type inference (numeric, text, temporal)
//! - [`validate`]: checks the table is non-empty and contains the required
//!   columns
//! - [`preprocess`]: missing-value handling (drop or fill), duplicate-row
//!   removal, text whitespace normalization
//! - [`analyzers`]: shape, per-column facts, numeric summaries, optional
//!   Pearson correlations, categorical frequencies, and quality metrics
//! - [`report`]: plain-text report and console summary
//! - [`persist`]: CSV, spreadsheet, and JSON outputs plus the report file
//! - [`sample`]: deterministic synthetic data for exercising the pipeline
//!
//! Everything is single-threaded and synchronous: every operation runs to
//! completion or returns an error, and tables are not designed to be shared
//! across simultaneous pipeline runs.

pub mod analyzers;
pub mod error;
pub mod logging;
pub mod persist;
pub mod prelude;
pub mod preprocess;
pub mod report;
pub mod sample;
pub mod sources;
pub mod table;
pub mod validate;
