//! Assembly of the final report and writing it to disk.

mod tree_report;

pub use tree_report::{ReportError, TreeReport};
