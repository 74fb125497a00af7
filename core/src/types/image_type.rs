use std::fmt;

/// Marker found in the ImageType of scout (localizer) images
pub const SCOUT_MARKER: &str = "LOCALIZER";

/// DICOM ImageType field split into its backslash-separated values
///
/// Typical CT values are `ORIGINAL\PRIMARY\AXIAL`, `ORIGINAL\PRIMARY\LOCALIZER`
/// or `DERIVED\SECONDARY\SCREEN SAVE`.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct ImageType {
    values: Vec<String>,
}

impl ImageType {
    /// Creates a new ImageType from its values
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Parses the raw backslash-delimited representation
    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.split('\\')
                .map(|part| part.trim().to_string())
                .collect(),
        )
    }

    /// Returns the individual values
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Checks if the image type contains a specific value
    pub fn contains(&self, val: &str) -> bool {
        self.values.iter().any(|v| v == val)
    }

    /// Returns true if one of the values contains the localizer marker
    ///
    /// `LOCALIZER`, `LOCALIZERS` and `LOCALIZER_2` all mark a scout.
    pub fn is_localizer(&self) -> bool {
        self.values.iter().any(|v| v.contains(SCOUT_MARKER))
    }

    /// Returns true if no value is present
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.is_empty())
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values.join("\\"))
    }
}
