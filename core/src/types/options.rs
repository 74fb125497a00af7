use crate::extraction::tags::{ElementTags, CT_MODALITY};
use crate::types::SortCriterion;

/// Options controlling how an exam reads its images
///
/// # Example
///
/// ```
/// use rradarr_core::{ExamOptions, SortCriterion};
///
/// let options = ExamOptions::default()
///     .defer_loading(true)
///     .sort_by(Some(SortCriterion::SliceLocation));
///
/// assert!(options.defer_loading);
/// assert_eq!(options.required_modality, "CT");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExamOptions {
    /// Wait for an explicit `load()` instead of reading on `bind()`
    pub defer_loading: bool,

    /// Reordering applied to the exam images once read
    pub sort_by: Option<SortCriterion>,

    /// Modality every image must have
    pub required_modality: String,

    /// Element identifiers used to classify and export images
    pub tags: ElementTags,
}

impl Default for ExamOptions {
    fn default() -> Self {
        Self {
            defer_loading: false,
            sort_by: None,
            required_modality: CT_MODALITY.to_string(),
            tags: ElementTags::default(),
        }
    }
}

impl ExamOptions {
    /// Builder: defer reading the images until `load()`
    pub fn defer_loading(mut self, defer: bool) -> Self {
        self.defer_loading = defer;
        self
    }

    /// Builder: reorder the exam images after reading them
    pub fn sort_by(mut self, criterion: Option<SortCriterion>) -> Self {
        self.sort_by = criterion;
        self
    }

    /// Builder: set the modality every image must have
    pub fn required_modality(mut self, modality: impl Into<String>) -> Self {
        self.required_modality = modality.into();
        self
    }

    /// Builder: use other element identifiers
    pub fn with_tags(mut self, tags: ElementTags) -> Self {
        self.tags = tags;
        self
    }
}
