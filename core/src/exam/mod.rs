//! Exam aggregation
//!
//! An [`Exam`] reads the DICOM images of one CT exam from a source
//! directory, sets the scout (localizer) images apart from the images of
//! the exam itself, and derives the exam name and structural homogeneity
//! used by the exporters.
//!
//! Loading is a one-shot operation: once loaded, the image set stays
//! unchanged until another source directory is bound.

mod decoder;
mod ordering;
mod record;

pub use decoder::{Decoder, DicomFileDecoder};
pub use ordering::{order_by, slice_location_key};
pub use record::Record;

use crate::error::{RradarrError, Result};
use crate::extraction::classifier::{check_homogeneity, is_candidate_file, partition_scouts};
use crate::extraction::tags::ElementTags;
use crate::types::{ExamOptions, ExamState, Homogeneity, SortCriterion};
use log::{debug, info};
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// Name of an exam whose images have not been read yet
pub const UNNAMED_EXAM: &str = "(no name)";

/// Name of an exam whose directory holds no DICOM image
pub const EMPTY_EXAM_NAME: &str = "(empty image set)";

/// Modality reported when a record has no Modality element
const MISSING_MODALITY: &str = "(none)";

/// The DICOM images of one CT exam
///
/// # Example
///
/// ```no_run
/// use rradarr_core::{Exam, ExamOptions, SortCriterion};
///
/// let options = ExamOptions::default().sort_by(Some(SortCriterion::SliceLocation));
/// let exam = Exam::open("images/exam001", options).unwrap();
/// println!("{}: {} images, {} scouts", exam.name(), exam.images().len(), exam.scouts().len());
/// ```
pub struct Exam {
    options: ExamOptions,
    decoder: Box<dyn Decoder>,
    state: ExamState,
    source_dir: Option<PathBuf>,
    images: Vec<Record>,
    scouts: Vec<Record>,
    name: String,
    homogeneity: Cell<Homogeneity>,
}

impl Exam {
    /// Creates an unbound exam reading files with [`DicomFileDecoder`]
    pub fn new(options: ExamOptions) -> Self {
        Self::with_decoder(options, Box::new(DicomFileDecoder))
    }

    /// Creates an unbound exam with a custom decoder
    pub fn with_decoder(options: ExamOptions, decoder: Box<dyn Decoder>) -> Self {
        Self {
            options,
            decoder,
            state: ExamState::Unbound,
            source_dir: None,
            images: Vec::new(),
            scouts: Vec::new(),
            name: UNNAMED_EXAM.to_string(),
            homogeneity: Cell::new(Homogeneity::Unknown),
        }
    }

    /// Creates an exam bound to `dir`, loading it unless loading is deferred
    pub fn open(dir: impl AsRef<Path>, options: ExamOptions) -> Result<Self> {
        let mut exam = Self::new(options);
        exam.bind(dir)?;
        Ok(exam)
    }

    /// Binds the exam to a source directory
    ///
    /// The path is normalized first: trailing separators and a file name
    /// component are removed. Binding the directory already bound is a
    /// no-op; otherwise all images read so far are dropped and, unless
    /// loading is deferred, the new directory is loaded right away.
    ///
    /// Returns the normalized directory.
    pub fn bind(&mut self, dir: impl AsRef<Path>) -> Result<&Path> {
        let dir = normalize_source_dir(dir.as_ref());
        if self.source_dir.as_deref() != Some(dir.as_path()) {
            self.reset();
            debug!("Bound exam to {}", dir.display());
            self.source_dir = Some(dir);
            self.state = ExamState::Bound;
            if !self.options.defer_loading {
                self.load()?;
            }
        }
        Ok(self.source_dir.as_deref().unwrap_or(Path::new("")))
    }

    /// Reads all DICOM images found directly in the source directory
    ///
    /// Returns the number of images read (exam images and scouts), or
    /// `None` if the images had already been read.
    ///
    /// # Errors
    ///
    /// - [`RradarrError::Unbound`] if no directory was bound
    /// - [`RradarrError::DecodeFailure`] if a candidate file cannot be decoded
    /// - [`RradarrError::UnsupportedModality`] if an image is not from the
    ///   required modality
    ///
    /// On error the exam keeps no image from the directory.
    pub fn load(&mut self) -> Result<Option<usize>> {
        if self.state == ExamState::Loaded {
            return Ok(None);
        }
        let source_dir = self.source_dir.clone().ok_or(RradarrError::Unbound)?;
        let tags = self.options.tags;

        let mut records = Vec::new();
        for path in find_images_in(&source_dir)? {
            records.push(self.read_image(&path)?);
        }

        // Scouts are pruned first so that the name comes from the exam images
        let (images, scouts) = partition_scouts(records, &tags);
        let name = extract_exam_name(&images, &scouts, &tags);
        let images = order_by(self.options.sort_by, images, tags.slice_location);

        info!(
            "Read {} images and {} scouts from {} ({})",
            images.len(),
            scouts.len(),
            source_dir.display(),
            name
        );

        self.images = images;
        self.scouts = scouts;
        self.name = name;
        self.homogeneity.set(Homogeneity::Unknown);
        self.state = ExamState::Loaded;

        Ok(Some(self.images.len() + self.scouts.len()))
    }

    /// Decodes one file and checks it is fit to be part of the exam
    fn read_image(&self, path: &Path) -> Result<Record> {
        let mut record = self.decoder.decode(path)?;
        let tags = &self.options.tags;

        let modality = record.string_value(tags.modality);
        if modality.as_deref() != Some(self.options.required_modality.as_str()) {
            return Err(RradarrError::UnsupportedModality {
                path: path.to_path_buf(),
                expected: self.options.required_modality.clone(),
                found: modality.unwrap_or_else(|| MISSING_MODALITY.to_string()),
            });
        }

        // Pixel data is never exported
        record.remove(tags.pixel_data);
        debug!("Read {}", path.display());
        Ok(record)
    }

    /// Clears everything read from the previous source directory
    fn reset(&mut self) {
        self.source_dir = None;
        self.state = ExamState::Unbound;
        self.images.clear();
        self.scouts.clear();
        self.name = UNNAMED_EXAM.to_string();
        self.homogeneity.set(Homogeneity::Unknown);
    }

    pub fn state(&self) -> ExamState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == ExamState::Loaded
    }

    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    pub fn options(&self) -> &ExamOptions {
        &self.options
    }

    pub fn tags(&self) -> &ElementTags {
        &self.options.tags
    }

    /// Name of the exam, from the Series Description of its images
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Images of the exam itself, in current order
    pub fn images(&self) -> &[Record] {
        &self.images
    }

    /// Scout (localizer) images, in discovery order
    pub fn scouts(&self) -> &[Record] {
        &self.scouts
    }

    /// Looks up an image or scout by its source file path
    pub fn record(&self, path: impl AsRef<Path>) -> Option<&Record> {
        let path = path.as_ref();
        self.images
            .iter()
            .chain(self.scouts.iter())
            .find(|record| record.path() == path)
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn has_scouts(&self) -> bool {
        !self.scouts.is_empty()
    }

    /// True if neither exam images nor scouts are held
    pub fn is_empty(&self) -> bool {
        !self.has_images() && !self.has_scouts()
    }

    /// Returns true if all exam images share the same element structure
    ///
    /// Scouts are not considered; an exam without images is homogeneous.
    /// The result is cached until the next load.
    pub fn is_homogeneous(&self) -> bool {
        if let Some(known) = self.homogeneity.get().known() {
            return known;
        }
        let homogeneity = check_homogeneity(&self.images);
        self.homogeneity.set(homogeneity);
        homogeneity == Homogeneity::Homogeneous
    }

    /// Cached homogeneity, without computing it
    pub fn homogeneity(&self) -> Homogeneity {
        self.homogeneity.get()
    }

    /// Returns the exam images reordered by `criterion`, leaving the exam as is
    pub fn sorted_images(&self, criterion: Option<SortCriterion>) -> Vec<&Record> {
        order_by(
            criterion,
            self.images.iter().collect(),
            self.options.tags.slice_location,
        )
    }

    /// Reorders the exam images in place
    pub fn sort_images_by(&mut self, criterion: Option<SortCriterion>) {
        let images = std::mem::take(&mut self.images);
        self.images = order_by(criterion, images, self.options.tags.slice_location);
    }
}

/// Removes trailing separators and a file name component from a directory path
///
/// `"test"`, `"test/"` and `"test/image.dcm"` all normalize to `"test"`.
pub fn normalize_source_dir(path: &Path) -> PathBuf {
    let dir = if path.is_file() {
        path.parent().unwrap_or(Path::new(""))
    } else {
        path
    };
    let normalized: PathBuf = dir.components().collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Lists the files directly under `dir` that look like DICOM images
fn find_images_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_candidate_file(&path) {
            files.push(path);
        } else {
            debug!("Skipping {}: no DICOM header", path.display());
        }
    }
    files.sort();
    Ok(files)
}

/// Series Description of the first exam image, else of the first scout
fn extract_exam_name(images: &[Record], scouts: &[Record], tags: &ElementTags) -> String {
    match images.first().or_else(|| scouts.first()) {
        Some(record) => record
            .string_value(tags.series_description)
            .unwrap_or_default(),
        None => EMPTY_EXAM_NAME.to_string(),
    }
}
