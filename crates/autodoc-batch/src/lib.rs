//! Batch orchestration for autodoc: candidate selection, the sequential
//! processing loop, and the aggregate result report.

mod report;
mod runner;
mod select;

pub use report::ResultReport;
pub use runner::{BatchOutcome, BatchRunner};
pub use select::{FileCandidate, FileSelector};
