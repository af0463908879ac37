//! Report output: the operator table as CSV and collision diagnostics as JSON.

pub mod csv_report;
pub mod json;

pub use csv_report::write_csv_report;
pub use json::write_collisions;
