//! Report records for CLI output
//!
//! Records are the flattened results of the enumeration pipeline, shaped for
//! csv, table and JSON output.

pub mod report;

pub use report::{UserProject, UserRecord};
