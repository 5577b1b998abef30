//! Table validation: non-empty shape and required-column presence.

use tracing::{info, instrument};

use crate::error::{Result, SiftError};
use crate::table::Table;

/// Validates a loaded table before preprocessing.
///
/// Fails when the table has zero rows. When `required_columns` is supplied,
/// fails if any required column is absent, naming *every* missing column in
/// the error rather than the first one found. On success the table passes
/// through unchanged.
#[instrument(skip(table, required_columns), fields(rows = table.row_count()))]
pub fn validate(table: Table, required_columns: Option<&[String]>) -> Result<Table> {
    if table.row_count() == 0 {
        return Err(SiftError::invalid_data("table contains no rows"));
    }

    if let Some(required) = required_columns {
        let names = table.column_names();
        let missing: Vec<&str> = required
            .iter()
            .map(String::as_str)
            .filter(|r| !names.contains(r))
            .collect();

        if !missing.is_empty() {
            return Err(SiftError::invalid_data(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }
    }

    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "table validated"
    );
    Ok(table)
}
