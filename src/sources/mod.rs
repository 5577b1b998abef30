//! Data source loaders.
//!
//! The only source today is [`CsvSource`], which reads a delimited text file
//! into an in-memory [`crate::table::Table`] with per-column type inference.

mod csv;

pub use self::csv::{CsvOptions, CsvSource};
