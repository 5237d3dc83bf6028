//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod csv;
pub mod json;
pub mod table;

pub use csv::CsvRecord;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

impl<T> Formattable for [T]
where
    T: CsvRecord + Tabled + Serialize,
{
    fn format(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Csv => csv::format_csv(self),
            OutputFormat::Table => table::format_table(self),
            OutputFormat::Json => json::format_json(self)?,
        })
    }
}

/// Format and print data to stdout
///
/// Nothing is printed when the formatted output is empty (a csv report
/// with no records).
pub fn print<T: Formattable + ?Sized>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
