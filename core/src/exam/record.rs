use crate::extraction::tags::{
    format_tag, get_float_value, get_multi_string_value, get_string_value, trim_padding,
};
use crate::types::ImageType;
use dicom_core::Tag;
use dicom_object::mem::InMemElement;
use dicom_object::InMemDicomObject;
use std::path::{Path, PathBuf};

/// One decoded image file of an exam
///
/// Wraps the decoded DICOM object together with the path of its source
/// file. Elements are kept in tag order, which is the column order of
/// the CSV export.
#[derive(Debug, Clone)]
pub struct Record {
    path: PathBuf,
    object: InMemDicomObject,
}

impl Record {
    /// Creates a record from an already-decoded DICOM object
    pub fn new(path: impl Into<PathBuf>, object: InMemDicomObject) -> Self {
        Self {
            path: path.into(),
            object,
        }
    }

    /// Path to the source file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The decoded DICOM object
    pub fn object(&self) -> &InMemDicomObject {
        &self.object
    }

    pub fn exists(&self, tag: Tag) -> bool {
        self.object.element(tag).is_ok()
    }

    /// Raw value of an element, rendered as text
    pub fn value(&self, tag: Tag) -> Option<String> {
        self.object.element(tag).ok().map(render_value)
    }

    /// Single string value, with DICOM padding removed
    pub fn string_value(&self, tag: Tag) -> Option<String> {
        get_string_value(&self.object, tag)
    }

    /// Numeric value, if present and convertible
    pub fn float_value(&self, tag: Tag) -> Option<f64> {
        get_float_value(&self.object, tag)
    }

    /// Parsed ImageType-like multi-valued element
    pub fn image_type(&self, tag: Tag) -> Option<ImageType> {
        get_multi_string_value(&self.object, tag).map(ImageType::new)
    }

    /// Removes an element, returning whether it was present
    pub fn remove(&mut self, tag: Tag) -> bool {
        self.object.remove_element(tag)
    }

    /// Element tags in record order
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.object.iter().map(|elem| elem.header().tag)
    }

    /// `(tag, value)` pairs in record order
    pub fn elements(&self) -> impl Iterator<Item = (Tag, String)> + '_ {
        self.object
            .iter()
            .map(|elem| (elem.header().tag, render_value(elem)))
    }

    pub fn element_count(&self) -> usize {
        self.object.iter().count()
    }

    /// Order-sensitive fingerprint of the element tags
    ///
    /// Two records share a signature iff they hold the same tags in the same
    /// order, whatever their values.
    pub fn structural_signature(&self) -> String {
        self.tags().map(format_tag).collect::<Vec<_>>().join("/")
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

/// Renders an element value the way it appears in exports
fn render_value(elem: &InMemElement) -> String {
    if let Ok(s) = elem.to_str() {
        return trim_padding(&s).to_string();
    }
    match elem.items() {
        Some(items) => format!("({} items)", items.len()),
        None => String::new(),
    }
}
