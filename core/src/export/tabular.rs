use super::ensure_exportable;
use crate::error::Result;
use crate::exam::Exam;
use crate::extraction::ElementDictionary;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

/// Header of the pseudo-element holding the source file of each image
pub const SOURCE_FILE_LABEL: &str = "DICOM Source File";

/// CSV projection of the exam images
///
/// One column per element of the first exam image, preceded by the
/// source file path; one row per exam image.
pub struct CsvExport<'a> {
    exam: &'a Exam,
    dictionary: &'a ElementDictionary,
}

impl<'a> CsvExport<'a> {
    /// Creates a new CSV export
    pub fn new(exam: &'a Exam, dictionary: &'a ElementDictionary) -> Self {
        Self { exam, dictionary }
    }

    /// Column names, e.g. `[..., "0010,0010 (PatientName)", ...]`
    ///
    /// Empty if the exam has no image. Fails like [`ensure_exportable`].
    pub fn header(&self) -> Result<Vec<String>> {
        ensure_exportable(self.exam)?;
        Ok(self.header_unchecked())
    }

    /// Element values of each exam image, in the same order as the header
    ///
    /// Fails like [`ensure_exportable`].
    pub fn rows(&self) -> Result<Vec<Vec<String>>> {
        ensure_exportable(self.exam)?;
        Ok(self.rows_unchecked())
    }

    fn header_unchecked(&self) -> Vec<String> {
        let Some(first) = self.exam.images().first() else {
            return Vec::new();
        };
        std::iter::once(SOURCE_FILE_LABEL.to_string())
            .chain(first.tags().map(|tag| self.dictionary.label_for(tag)))
            .collect()
    }

    fn rows_unchecked(&self) -> Vec<Vec<String>> {
        self.exam
            .images()
            .iter()
            .map(|record| {
                std::iter::once(record.path().display().to_string())
                    .chain(record.elements().map(|(_, value)| value))
                    .collect()
            })
            .collect()
    }

    /// Writes the header and rows as CSV, all fields quoted
    ///
    /// Returns the number of data rows written. Nothing is written when the
    /// exam has no image, nor when it fails [`ensure_exportable`].
    pub fn write_to<W: Write>(&self, mut output: W) -> Result<usize> {
        ensure_exportable(self.exam)?;
        if !self.exam.has_images() {
            return Ok(0);
        }

        let rows = self.rows_unchecked();
        let mut csv = WriterBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .quote_style(QuoteStyle::Always)
            .from_writer(Vec::new());
        csv.write_record(self.header_unchecked())?;
        for row in &rows {
            csv.write_record(row)?;
        }

        output.write_all(&csv.into_inner()?)?;
        output.flush()?;
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RradarrError;
    use crate::fixtures::{self, FixtureDecoder};
    use crate::types::{ExamOptions, SortCriterion};
    use csv::ReaderBuilder;
    use tempfile::TempDir;

    fn load(dir: &std::path::Path, decoder: FixtureDecoder, options: ExamOptions) -> Exam {
        let mut exam = Exam::with_decoder(options, Box::new(decoder));
        exam.bind(dir).unwrap();
        exam
    }

    #[test]
    fn test_header_has_one_column_per_element() {
        let temp_dir = TempDir::new().unwrap();
        let exam = load(
            temp_dir.path(),
            fixtures::ct_series(temp_dir.path(), 15, 175.0),
            ExamOptions::default(),
        );
        let dictionary = ElementDictionary::standard();
        let export = CsvExport::new(&exam, &dictionary);

        let header = export.header().unwrap();
        let first = &exam.images()[0];
        assert_eq!(header.len(), 1 + first.element_count());
        assert_eq!(header[0], SOURCE_FILE_LABEL);
        assert!(header.contains(&dictionary.label_for(exam.tags().modality)));
        assert!(header.contains(&dictionary.label_for(exam.tags().tube_current)));
        assert!(header.contains(&dictionary.label_for(exam.tags().slice_location)));
        assert_eq!(
            header.last().map(|s| s.starts_with("7FE0,0000")),
            Some(true)
        );

        for row in export.rows().unwrap() {
            assert_eq!(row.len(), header.len());
        }
    }

    #[test]
    fn test_scouts_are_not_exported() {
        let temp_dir = TempDir::new().unwrap();
        let mut decoder = FixtureDecoder::default();
        decoder.add(temp_dir.path(), "IM-0001.dcm", fixtures::scout_object("LAPIN 2 PRO"));
        decoder.add(temp_dir.path(), "IM-0002.dcm", fixtures::scout_object("LAPIN 2 PRO"));
        let exam = load(temp_dir.path(), decoder, ExamOptions::default());
        let dictionary = ElementDictionary::standard();
        let export = CsvExport::new(&exam, &dictionary);

        assert!(export.header().unwrap().is_empty());
        assert!(export.rows().unwrap().is_empty());

        let mut out = Vec::new();
        assert_eq!(export.write_to(&mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_exports_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let exam = load(
            temp_dir.path(),
            fixtures::ct_series(temp_dir.path(), 15, 175.0),
            ExamOptions::default().sort_by(Some(SortCriterion::SliceLocation)),
        );
        let dictionary = ElementDictionary::standard();
        let export = CsvExport::new(&exam, &dictionary);

        let csv_path = temp_dir.path().join("exam.csv");
        let file = std::fs::File::create(&csv_path).unwrap();
        assert_eq!(export.write_to(file).unwrap(), 15);

        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert!(text.starts_with(&format!("\"{}\",", SOURCE_FILE_LABEL)));

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_path(&csv_path)
            .unwrap();
        let datasheet: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(datasheet.len(), 16);

        let header = &datasheet[0];
        assert_eq!(header.len(), export.header().unwrap().len());
        let position = |label: String| header.iter().position(|h| h == label).unwrap();
        assert_eq!(position(SOURCE_FILE_LABEL.to_string()), 0);
        let location_col = position(dictionary.label_for(exam.tags().slice_location));
        let current_col = position(dictionary.label_for(exam.tags().tube_current));

        for (row, record) in datasheet[1..].iter().zip(exam.images()) {
            assert_eq!(row.len(), header.len());
            assert_eq!(&row[0], record.path().display().to_string());
            assert_eq!(
                Some(row[location_col].to_string()),
                record.value(exam.tags().slice_location)
            );
            assert_eq!(&row[current_col], "175");
        }
    }

    #[test]
    fn test_refuses_variant_structure() {
        let temp_dir = TempDir::new().unwrap();
        let exam = load(
            temp_dir.path(),
            fixtures::mixed_series(temp_dir.path()),
            ExamOptions::default(),
        );
        let dictionary = ElementDictionary::standard();

        let export = CsvExport::new(&exam, &dictionary);
        assert!(matches!(
            export.header(),
            Err(RradarrError::InconsistentStructure { .. })
        ));
        assert!(matches!(
            export.rows(),
            Err(RradarrError::InconsistentStructure { .. })
        ));

        let mut out = Vec::new();
        let result = export.write_to(&mut out);
        assert!(matches!(
            result,
            Err(RradarrError::InconsistentStructure { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_exports_file_meta_elements() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..3u32 {
            let obj = fixtures::ct_object(fixtures::SERIES_NAME, i + 1, 60.0 - i as f64, 175.0);
            fixtures::write_dicom_file(temp_dir.path(), &format!("IM-0001-{:04}.dcm", i + 1), obj);
        }
        let exam = Exam::open(temp_dir.path(), ExamOptions::default()).unwrap();
        let dictionary = ElementDictionary::standard();
        let export = CsvExport::new(&exam, &dictionary);

        let header = export.header().unwrap();
        assert!(header[1].starts_with("0002,"));
        let transfer_syntax = header
            .iter()
            .position(|label| label.starts_with("0002,0010"))
            .unwrap();
        for row in export.rows().unwrap() {
            assert_eq!(row[transfer_syntax], "1.2.840.10008.1.2.1");
        }
    }

    #[test]
    fn test_refuses_unloaded_exam() {
        let temp_dir = TempDir::new().unwrap();
        let exam = load(
            temp_dir.path(),
            fixtures::ct_series(temp_dir.path(), 2, 175.0),
            ExamOptions::default().defer_loading(true),
        );
        let dictionary = ElementDictionary::standard();

        let export = CsvExport::new(&exam, &dictionary);
        assert!(matches!(export.header(), Err(RradarrError::NotLoaded)));

        let mut out = Vec::new();
        let result = export.write_to(&mut out);
        assert!(matches!(result, Err(RradarrError::NotLoaded)));
        assert!(out.is_empty());
    }
}
