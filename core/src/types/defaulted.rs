use serde::{Serialize, Serializer};
use std::fmt;

/// Optional numeric element value with an explicit fallback
///
/// Keeps track of whether the element was present, so a missing value
/// can be told apart from one that happens to equal the fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defaulted {
    value: Option<f64>,
    fallback: f64,
}

impl Defaulted {
    /// Creates a new value, falling back to `fallback` when `value` is `None`
    pub const fn new(value: Option<f64>, fallback: f64) -> Self {
        Self { value, fallback }
    }

    /// Missing numeric fields read as zero in chart exports
    pub const fn or_zero(value: Option<f64>) -> Self {
        Self::new(value, 0.0)
    }

    /// Missing slice locations sort before every other image
    pub const fn or_neg_infinity(value: Option<f64>) -> Self {
        Self::new(value, f64::NEG_INFINITY)
    }

    /// Returns the value, or the fallback if missing
    pub fn get(&self) -> f64 {
        self.value.unwrap_or(self.fallback)
    }

    /// Returns the value as found in the record
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

impl Serialize for Defaulted {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.get())
    }
}

impl fmt::Display for Defaulted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "{} (missing)", self.fallback),
        }
    }
}
