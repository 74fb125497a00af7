//! Display labels for DICOM elements
//!
//! [`ElementDictionary`] maps an element tag to the label used in CSV
//! headers, e.g. `"0008,0060 (Modality)"`. It is built once by the caller
//! and passed to the exporters.

use super::tags::format_tag;
use dicom_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dicom_core::Tag;
use dicom_dictionary_std::StandardDataDictionary;
use std::collections::HashMap;

/// Immutable lookup table from element tag to human name
#[derive(Debug, Clone, Default)]
pub struct ElementDictionary {
    names: HashMap<Tag, String>,
    standard: Option<StandardDataDictionary>,
}

impl ElementDictionary {
    /// Dictionary backed by the standard DICOM data dictionary
    pub fn standard() -> Self {
        Self {
            names: HashMap::new(),
            standard: Some(StandardDataDictionary),
        }
    }

    /// Dictionary holding only the given entries
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Tag, S)>,
        S: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(tag, name)| (tag, name.into()))
                .collect(),
            standard: None,
        }
    }

    /// Builder: adds or overrides one entry
    pub fn with_entry(mut self, tag: Tag, name: impl Into<String>) -> Self {
        self.names.insert(tag, name.into());
        self
    }

    /// Returns the human name of a tag, if known
    pub fn name_of(&self, tag: Tag) -> Option<&str> {
        if let Some(name) = self.names.get(&tag) {
            return Some(name.as_str());
        }
        self.standard
            .as_ref()
            .and_then(|dict| dict.by_tag(tag))
            .map(|entry| entry.alias())
    }

    /// Returns `"GGGG,EEEE (Name)"` for known tags, `"GGGG,EEEE"` otherwise
    pub fn label_for(&self, tag: Tag) -> String {
        match self.name_of(tag) {
            Some(name) if !name.is_empty() => format!("{} ({})", format_tag(tag), name),
            _ => format_tag(tag),
        }
    }
}
