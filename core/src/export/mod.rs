//! Exports of the exam images metadata
//!
//! - [`CsvExport`]: every element of every exam image, one row per image
//! - [`ChartExport`]: slice location, tube current and exposure time of
//!   each image, rendered as a static HTML chart
//!
//! Both export the exam images in their current order; sort them by slice
//! location beforehand. Scouts are never exported.

mod chart;
mod tabular;
mod template;

pub use chart::{ChartExport, ChartPoint};
pub use tabular::{CsvExport, SOURCE_FILE_LABEL};
pub use template::html_graph_for;

use crate::error::{RradarrError, Result};
use crate::exam::Exam;
use std::path::PathBuf;

/// Checks the exam can be exported with one fixed column layout
///
/// # Errors
///
/// - [`RradarrError::NotLoaded`] if the images have not been read
/// - [`RradarrError::InconsistentStructure`] if the exam images differ in structure
pub fn ensure_exportable(exam: &Exam) -> Result<()> {
    if !exam.is_loaded() {
        return Err(RradarrError::NotLoaded);
    }
    if !exam.is_homogeneous() {
        return Err(RradarrError::InconsistentStructure {
            dir: exam.source_dir().map(PathBuf::from).unwrap_or_default(),
        });
    }
    Ok(())
}
