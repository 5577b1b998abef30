//! Deterministic sample-data generation.
//!
//! Produces a synthetic table with columns `{Name, Age, Score, Category,
//! Date}` and deliberately injected missing values, for exercising the
//! pipeline without real data. Generation is fully reproducible for a given
//! seed and row count.

use std::path::Path;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

use crate::error::{Result, SiftError};
use crate::table::{Column, Table};

/// Seed used by [`create_sample_data`].
pub const DEFAULT_SEED: u64 = 42;

/// Missing Age cells injected (capped at the row count).
const MISSING_AGES: usize = 3;

/// Missing Score cells injected (capped at the row count).
const MISSING_SCORES: usize = 5;

const NAME_POOL: &[&str] = &[
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry", "Ivy", "Jack",
];

const CATEGORIES: &[&str] = &["A", "B", "C"];

/// Generates the synthetic sample table.
///
/// Ages are uniform in 18..70, scores uniform in 0..100 rounded to two
/// decimals, dates count up daily from 2024-01-01. Exactly
/// `min(3, num_rows)` Age cells and `min(5, num_rows)` Score cells are
/// missing, at seeded-random distinct positions. When `num_rows >= 10` the
/// last row duplicates the first so downstream de-duplication has work to
/// do.
pub fn generate_sample_table(num_rows: usize, seed: u64) -> Table {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();

    let mut names: Vec<Option<String>> = Vec::with_capacity(num_rows);
    let mut ages: Vec<Option<f64>> = Vec::with_capacity(num_rows);
    let mut scores: Vec<Option<f64>> = Vec::with_capacity(num_rows);
    let mut categories: Vec<Option<String>> = Vec::with_capacity(num_rows);
    let mut dates: Vec<Option<NaiveDate>> = Vec::with_capacity(num_rows);

    for row in 0..num_rows {
        names.push(Some(
            NAME_POOL[rng.random_range(0..NAME_POOL.len())].to_string(),
        ));
        ages.push(Some(rng.random_range(18..70) as f64));
        scores.push(Some(
            (rng.random_range(0.0f64..100.0) * 100.0).round() / 100.0,
        ));
        categories.push(Some(
            CATEGORIES[rng.random_range(0..CATEGORIES.len())].to_string(),
        ));
        dates.push(start.checked_add_days(Days::new(row as u64)));
    }

    if num_rows >= 10 {
        let last = num_rows - 1;
        names[last] = names[0].clone();
        ages[last] = ages[0];
        scores[last] = scores[0];
        categories[last] = categories[0].clone();
        dates[last] = dates[0];
    }

    // Keep the duplicated first/last pair intact by injecting missing
    // values into interior rows only.
    let candidates: Vec<usize> = if num_rows >= 10 {
        (1..num_rows - 1).collect()
    } else {
        (0..num_rows).collect()
    };
    for index in distinct_indices(&mut rng, &candidates, MISSING_AGES.min(candidates.len())) {
        ages[index] = None;
    }
    for index in distinct_indices(&mut rng, &candidates, MISSING_SCORES.min(candidates.len())) {
        scores[index] = None;
    }

    let columns = vec![
        ("Name".to_string(), Column::Text(names)),
        ("Age".to_string(), Column::Numeric(ages)),
        ("Score".to_string(), Column::Numeric(scores)),
        ("Category".to_string(), Column::Text(categories)),
        ("Date".to_string(), Column::Temporal(dates)),
    ];

    // Column names are fixed and lengths match by construction.
    Table::new(columns).unwrap_or_default()
}

/// `count` distinct indices from `candidates`, drawn without replacement.
fn distinct_indices(rng: &mut StdRng, candidates: &[usize], count: usize) -> Vec<usize> {
    let mut pool: Vec<usize> = candidates.to_vec();
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        picked.push(pool.swap_remove(rng.random_range(0..pool.len())));
    }
    picked
}

/// Generates the sample table with the default seed and writes it to `path`
/// as CSV, creating the parent directory if needed.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn create_sample_data(path: impl AsRef<Path>, num_rows: usize) -> Result<()> {
    let path = path.as_ref();
    let table = generate_sample_table(num_rows, DEFAULT_SEED);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    write_table_csv(&table, path)?;
    info!(rows = num_rows, path = %path.display(), "sample data created");
    Ok(())
}

/// Writes a table as CSV with a header row; missing cells are empty.
pub fn write_table_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.column_names())?;

    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns()
            .map(|(_, col)| col.cell_display(row).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush().map_err(SiftError::from)?;
    Ok(())
}
