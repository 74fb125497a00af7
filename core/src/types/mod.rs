//! Core type definitions for CT exam metadata
//!
//! This module provides the fundamental types used throughout the rradarr library:
//! - [`SortCriterion`]: Reordering of the exam images
//! - [`Homogeneity`]: Cached structural consistency of the exam images
//! - [`ExamState`]: Loading state of an exam
//! - [`ImageType`]: Decomposed DICOM ImageType field
//! - [`Defaulted`]: Optional numeric value with an explicit fallback
//! - [`ExamOptions`]: Configuration for reading an exam

mod defaulted;
mod enums;
mod image_type;
mod options;

pub use defaulted::Defaulted;
pub use enums::{ExamState, Homogeneity, SortCriterion};
pub use image_type::{ImageType, SCOUT_MARKER};
pub use options::ExamOptions;
