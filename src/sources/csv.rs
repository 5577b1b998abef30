//! CSV file source implementation.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::error::{Result, SiftError};
use crate::table::{Column, Table};

/// Cell values treated as missing, compared case-insensitively after trimming.
const NA_VALUES: &[&str] = &["", "na", "n/a", "nan", "null"];

/// Date formats tried during type inference, in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Options for configuring CSV file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvOptions {
    /// Sets whether the file has a header row.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }
}

/// A delimited-file data source.
///
/// Loading infers each column's type from its parsed values: a column whose
/// non-missing cells all parse as floating point becomes numeric, one whose
/// cells all parse as a supported date format becomes temporal, and anything
/// else is text. Empty cells (and common NA spellings) are missing values.
///
/// # Examples
///
/// ```rust,no_run
/// use tabsift::sources::{CsvOptions, CsvSource};
///
/// # fn example() -> tabsift::error::Result<()> {
/// let table = CsvSource::new("data/users.csv").load()?;
///
/// let options = CsvOptions::default().with_delimiter(b'\t');
/// let table = CsvSource::with_options("data/users.tsv", options).load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a new CSV source for a single file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: CsvOptions::default(),
        }
    }

    /// Creates a new CSV source with custom options.
    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// The file path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file into a [`Table`].
    ///
    /// Fails with [`SiftError::NotFound`] if the path does not exist, and
    /// with a data error if the parser rejects the content or the file
    /// contains zero data rows.
    #[instrument(skip(self), fields(
        source.path = %self.path.display(),
        csv.delimiter = %self.options.delimiter as char,
        csv.has_header = self.options.has_header,
    ))]
    pub fn load(&self) -> Result<Table> {
        if !self.path.exists() {
            return Err(SiftError::not_found(&self.path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.options.has_header)
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .from_path(&self.path)?;

        let names: Vec<String> = if self.options.has_header {
            reader.headers()?.iter().map(|h| h.trim().to_string()).collect()
        } else {
            Vec::new()
        };

        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?);
        }

        if records.is_empty() {
            return Err(SiftError::invalid_data(format!(
                "file '{}' contains no data rows",
                self.path.display()
            )));
        }

        let width = records[0].len();
        let names = if names.is_empty() {
            (0..width).map(|i| format!("column_{i}")).collect()
        } else {
            names
        };

        let mut columns = Vec::with_capacity(width);
        for (index, name) in names.iter().enumerate() {
            let cells: Vec<&str> = records.iter().map(|r| r.get(index).unwrap_or("")).collect();
            let column = infer_column(&cells);
            debug!(column = %name, dtype = %column.data_type(), "inferred column type");
            columns.push((name.clone(), column));
        }

        let table = Table::new(columns)?;
        info!(
            rows = table.row_count(),
            columns = ?table.column_names(),
            "loaded delimited file"
        );
        Ok(table)
    }
}

fn is_missing(cell: &str) -> bool {
    NA_VALUES.iter().any(|na| cell.eq_ignore_ascii_case(na))
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
}

/// Infers a typed column from raw string cells.
///
/// Numeric wins when every non-missing cell parses as `f64`, temporal when
/// every non-missing cell parses as a supported date, otherwise text. A
/// column that is entirely missing stays text.
fn infer_column(cells: &[&str]) -> Column {
    let trimmed: Vec<&str> = cells.iter().map(|c| c.trim()).collect();
    let present: Vec<&str> = trimmed
        .iter()
        .copied()
        .filter(|c| !is_missing(c))
        .collect();

    if !present.is_empty() && present.iter().all(|c| c.parse::<f64>().is_ok()) {
        return Column::Numeric(
            trimmed
                .iter()
                .map(|c| {
                    if is_missing(c) {
                        None
                    } else {
                        c.parse::<f64>().ok()
                    }
                })
                .collect(),
        );
    }

    if !present.is_empty() && present.iter().all(|c| parse_date(c).is_some()) {
        return Column::Temporal(
            trimmed
                .iter()
                .map(|c| if is_missing(c) { None } else { parse_date(c) })
                .collect(),
        );
    }

    // Text keeps the original cell verbatim; whitespace normalization is the
    // preprocessor's responsibility.
    Column::Text(
        cells
            .iter()
            .map(|c| {
                if is_missing(c.trim()) {
                    None
                } else {
                    Some(c.to_string())
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DataType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "{content}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_infers_types() {
        let file = write_csv("name,age,joined\nAlice,30,2024-01-05\nBob,25,2024-02-11\n");
        let table = CsvSource::new(file.path()).load().unwrap();

        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.column("name").unwrap().data_type(), DataType::Text);
        assert_eq!(table.column("age").unwrap().data_type(), DataType::Numeric);
        assert_eq!(
            table.column("joined").unwrap().data_type(),
            DataType::Temporal
        );
    }

    #[test]
    fn test_empty_cells_become_missing() {
        let file = write_csv("a,b\n1,\n,x\n");
        let table = CsvSource::new(file.path()).load().unwrap();

        assert_eq!(table.column("a").unwrap().null_count(), 1);
        assert_eq!(table.column("b").unwrap().null_count(), 1);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = CsvSource::new("does/not/exist.csv").load().unwrap_err();
        assert!(matches!(err, SiftError::NotFound { .. }));
    }

    #[test]
    fn test_header_only_file_is_invalid() {
        let file = write_csv("a,b,c\n");
        let err = CsvSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, SiftError::InvalidData(_)));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let file = write_csv("a,b\n1,2\n3\n");
        let result = CsvSource::new(file.path()).load();
        assert!(result.is_err());
    }

    #[test]
    fn test_mixed_column_falls_back_to_text() {
        let file = write_csv("v\n1\nhello\n");
        let table = CsvSource::new(file.path()).load().unwrap();
        assert_eq!(table.column("v").unwrap().data_type(), DataType::Text);
    }

    #[test]
    fn test_custom_delimiter() {
        let file = write_csv("a;b\n1;2\n");
        let options = CsvOptions::default().with_delimiter(b';');
        let table = CsvSource::with_options(file.path(), options).load().unwrap();
        assert_eq!(table.shape(), (1, 2));
    }

    #[test]
    fn test_na_spellings_are_missing() {
        let file = write_csv("v\n1\nNA\nnan\n2\n");
        let table = CsvSource::new(file.path()).load().unwrap();
        let column = table.column("v").unwrap();
        assert_eq!(column.data_type(), DataType::Numeric);
        assert_eq!(column.null_count(), 2);
    }
}
