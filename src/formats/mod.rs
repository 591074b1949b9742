//! Edge-list file formats.

pub mod csv;

pub use self::csv::{Csv, CsvConfig};
