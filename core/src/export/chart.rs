use super::ensure_exportable;
use super::template::html_graph_for;
use crate::error::Result;
use crate::exam::{Exam, Record};
use crate::extraction::tags::ElementTags;
use crate::types::Defaulted;
use serde::Serialize;
use std::io::Write;

/// Exposure data of one exam image
///
/// Missing elements read as zero. Serialized with the short keys the
/// chart script expects: `sl`, `xr` and `et`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Slice location (mm)
    #[serde(rename = "sl")]
    pub slice_location: Defaulted,

    /// X-ray tube current (mA)
    #[serde(rename = "xr")]
    pub tube_current: Defaulted,

    /// Exposure time (ms)
    #[serde(rename = "et")]
    pub exposure_time: Defaulted,
}

impl ChartPoint {
    /// Extracts the chart point of a record
    pub fn from_record(record: &Record, tags: &ElementTags) -> Self {
        Self {
            slice_location: Defaulted::or_zero(record.float_value(tags.slice_location)),
            tube_current: Defaulted::or_zero(record.float_value(tags.tube_current)),
            exposure_time: Defaulted::or_zero(record.float_value(tags.exposure_time)),
        }
    }

    /// Tube current-time product (mAs)
    pub fn exposure(&self) -> f64 {
        self.tube_current.get() * self.exposure_time.get() / 1000.0
    }
}

/// Chart projection of the exam images
pub struct ChartExport<'a> {
    exam: &'a Exam,
}

impl<'a> ChartExport<'a> {
    /// Creates a new chart export
    pub fn new(exam: &'a Exam) -> Self {
        Self { exam }
    }

    /// One point per exam image, in current order
    pub fn points(&self) -> Vec<ChartPoint> {
        let tags = self.exam.tags();
        self.exam
            .images()
            .iter()
            .map(|record| ChartPoint::from_record(record, tags))
            .collect()
    }

    /// Points as a JSON array
    pub fn payload(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.points())?)
    }

    /// Self-contained HTML document charting the exposure along the exam
    pub fn render_html(&self) -> Result<String> {
        ensure_exportable(self.exam)?;
        html_graph_for(&self.points(), self.exam.name())
    }

    /// Writes the HTML chart
    ///
    /// Returns the number of points charted. Nothing is written when the
    /// exam has no image, nor when it fails [`ensure_exportable`].
    pub fn write_to<W: Write>(&self, mut output: W) -> Result<usize> {
        ensure_exportable(self.exam)?;
        if !self.exam.has_images() {
            return Ok(0);
        }
        let points = self.points();
        let html = html_graph_for(&points, self.exam.name())?;
        output.write_all(html.as_bytes())?;
        output.flush()?;
        Ok(points.len())
    }
}
