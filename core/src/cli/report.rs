use crate::exam::Exam;
use std::fmt;

/// Text report summarizing a loaded exam
pub struct ExamReport<'a> {
    exam: &'a Exam,
}

impl<'a> ExamReport<'a> {
    /// Creates a new exam report
    pub fn new(exam: &'a Exam) -> Self {
        Self { exam }
    }

    /// Lowest and highest slice location among the exam images
    pub fn slice_range(&self) -> Option<(f64, f64)> {
        let tag = self.exam.tags().slice_location;
        self.exam
            .images()
            .iter()
            .filter_map(|record| record.float_value(tag))
            .fold(None, |range, location| match range {
                None => Some((location, location)),
                Some((low, high)) => Some((low.min(location), high.max(location))),
            })
    }

    fn first_image_value(&self, tag: dicom_core::Tag) -> String {
        self.exam
            .images()
            .first()
            .and_then(|record| record.string_value(tag))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl<'a> fmt::Display for ExamReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags = self.exam.tags();

        writeln!(f, "Exam: {}", self.exam.name())?;
        writeln!(f, "==================")?;
        writeln!(
            f,
            "Directory:      {}",
            self.exam
                .source_dir()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "(unbound)".to_string())
        )?;
        writeln!(f, "State:          {}", self.exam.state())?;
        writeln!(f, "Images:         {}", self.exam.images().len())?;
        writeln!(f, "Scouts:         {}", self.exam.scouts().len())?;
        writeln!(f, "Homogeneity:    {}", self.exam.homogeneity())?;
        match self.slice_range() {
            Some((low, high)) => writeln!(f, "Slice Range:    {} .. {} mm", low, high)?,
            None => writeln!(f, "Slice Range:    unknown")?,
        }
        writeln!(f, "Scan Options:   {}", self.first_image_value(tags.scan_options))?;
        writeln!(f, "Filter Type:    {}", self.first_image_value(tags.filter_type))?;

        Ok(())
    }
}
