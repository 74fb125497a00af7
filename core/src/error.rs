use std::path::PathBuf;
use thiserror::Error;

/// Result type for rradarr operations
pub type Result<T> = std::result::Result<T, RradarrError>;

/// Error types for rradarr operations
#[derive(Error, Debug)]
pub enum RradarrError {
    /// A candidate file could not be decoded into a DICOM object
    #[error("DICOM file not processed: {}; corrupt file? ({reason})", path.display())]
    DecodeFailure { path: PathBuf, reason: String },

    /// A decoded file does not come from the expected kind of scanner
    #[error("DICOM file with modality other than '{expected}': {}, modality: {found}", path.display())]
    UnsupportedModality {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// Export requested over primary images that do not share one element layout
    #[error("DICOM source files have inconsistent structure among them: {}", dir.display())]
    InconsistentStructure { dir: PathBuf },

    /// Export requested before the images were loaded
    #[error("images of the exam have not been loaded")]
    NotLoaded,

    /// Load requested before any source directory was bound
    #[error("no source directory bound to the exam")]
    Unbound,

    /// Output file exists and overwriting was not allowed
    #[error("file {} exists, use --force to overwrite", .0.display())]
    OutputExists(PathBuf),

    /// No directory under the base path holds any file
    #[error("found no directories containing any files under {}", .0.display())]
    NoCandidateDirectories(PathBuf),

    /// CSV writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RradarrError {
    /// Builds a decode failure for `path` from any displayable cause
    pub fn decode_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        RradarrError::DecodeFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

// Writer errors surfaced by the csv crate wrap io errors that are not csv::Error
impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for RradarrError {
    fn from(e: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        RradarrError::IoError(e.into_error())
    }
}
