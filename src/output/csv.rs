//! Comma-delimited report lines
//!
//! One record per line, fields joined by `", "`. Fields are written as-is:
//! no quoting, no escaping of embedded commas, no sorting.

use crate::models::{UserProject, UserRecord};

/// Separator between fields on one line
pub const FIELD_SEPARATOR: &str = ", ";

/// A record that can be written as one delimited line
pub trait CsvRecord {
    fn fields(&self) -> Vec<&str>;
}

impl CsvRecord for UserProject {
    fn fields(&self) -> Vec<&str> {
        vec![
            &self.email,
            &self.project_name,
            &self.project_id,
            &self.project_number,
        ]
    }
}

impl CsvRecord for UserRecord {
    fn fields(&self) -> Vec<&str> {
        vec![&self.email]
    }
}

/// Format records as delimited lines, in the order given
pub fn format_csv<T: CsvRecord>(records: &[T]) -> String {
    records
        .iter()
        .map(|r| r.fields().join(FIELD_SEPARATOR))
        .collect::<Vec<_>>()
        .join("\n")
}
