use std::fmt;

/// Reordering applied to the primary images of an exam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
    /// Ascending Slice Location; images without one come first
    SliceLocation,
}

impl SortCriterion {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            SortCriterion::SliceLocation => "slice_location",
        }
    }

    /// Parses a sort criterion from string
    ///
    /// Unknown names yield `None`, which leaves the images in discovery order.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(|c: char| c == '-' || c == ' ', "_").as_str() {
            "slice_location" | "location" => Some(SortCriterion::SliceLocation),
            _ => None,
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Whether all primary images share the same element layout
///
/// Cached by the exam after the first check and reset on reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Homogeneity {
    #[default]
    Unknown,
    Homogeneous,
    Heterogeneous,
}

impl Homogeneity {
    /// Returns `Some(true)` once known to be homogeneous, `None` while unknown
    pub fn known(&self) -> Option<bool> {
        match self {
            Homogeneity::Unknown => None,
            Homogeneity::Homogeneous => Some(true),
            Homogeneity::Heterogeneous => Some(false),
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Homogeneity::Unknown => "unknown",
            Homogeneity::Homogeneous => "homogeneous",
            Homogeneity::Heterogeneous => "heterogeneous",
        }
    }
}

impl From<bool> for Homogeneity {
    fn from(homogeneous: bool) -> Self {
        if homogeneous {
            Homogeneity::Homogeneous
        } else {
            Homogeneity::Heterogeneous
        }
    }
}

impl fmt::Display for Homogeneity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Loading state of an exam
///
/// `Unbound -> Bound -> Loaded`; binding another directory goes back to `Bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExamState {
    #[default]
    Unbound,
    Bound,
    Loaded,
}

impl ExamState {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ExamState::Unbound => "unbound",
            ExamState::Bound => "bound",
            ExamState::Loaded => "loaded",
        }
    }
}

impl fmt::Display for ExamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
