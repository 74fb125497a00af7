//! CT exam metadata extraction
//!
//! Reads the DICOM images of CT exams from directories, sets scout images
//! apart, and exports the metadata of the exam images as CSV and as an
//! HTML chart of the exposure along the exam.

pub mod cli;
pub mod error;
pub mod exam;
pub mod export;
pub mod extraction;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use cli::batch::{crunch, BatchOptions, BatchSummary};
pub use cli::report::ExamReport;
pub use error::{Result, RradarrError};
pub use exam::{Decoder, DicomFileDecoder, Exam, Record};
pub use export::{ChartExport, ChartPoint, CsvExport};
pub use extraction::{ElementDictionary, ElementTags};
pub use types::*;
