//! Batch processing of exam directories
//!
//! Every candidate directory under a base path is read as one [`Exam`] and
//! exported next to itself: `<parent>/<dirname>.csv` and
//! `<parent>/<dirname>.html`.

use super::report::ExamReport;
use crate::error::{RradarrError, Result};
use crate::exam::Exam;
use crate::export::{ensure_exportable, ChartExport, CsvExport};
use crate::extraction::ElementDictionary;
use crate::types::{ExamOptions, SortCriterion};
use log::{debug, error, info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never searched for images
pub const EXCLUDED_DIRS: [&str; 3] = [".git", ".svn", ".cvs"];

/// Extensions of the files written by a batch run
pub const CSV_EXTENSION: &str = "csv";
pub const HTML_EXTENSION: &str = "html";

/// Settings of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub write_csv: bool,
    pub write_html: bool,
    pub force: bool,
    pub recurse: bool,
    pub dry_run: bool,
    pub keep_going: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            write_csv: true,
            write_html: false,
            force: false,
            recurse: true,
            dry_run: false,
            keep_going: false,
        }
    }
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Directories whose exam was exported (or summarized on a dry run)
    pub processed: Vec<PathBuf>,
    /// Directories holding no exam image
    pub skipped: Vec<PathBuf>,
    /// Directories that failed, only collected with `keep_going`
    pub failed: Vec<(PathBuf, RradarrError)>,
    /// Files written
    pub written: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Removes `.` components and resolves `..` against the preceding component
///
/// Purely lexical: symbolic links are not followed. An empty result is `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.last() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(component),
            },
            other => cleaned.push(other),
        }
    }
    if cleaned.is_empty() {
        PathBuf::from(".")
    } else {
        cleaned.into_iter().collect()
    }
}

/// Returns true if `dir` directly holds a file other than a batch output
pub fn is_candidate_dir(dir: &Path) -> io::Result<bool> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && !is_output_file(&path) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_output_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == CSV_EXTENSION || ext == HTML_EXTENSION)
        .unwrap_or(false)
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Lists the directories to read as exams, sorted by path
///
/// Without `recurse`, only `base` itself is considered.
pub fn collect_exam_dirs(base: &Path, recurse: bool) -> Result<Vec<PathBuf>> {
    if !recurse {
        return Ok(if is_candidate_dir(base)? {
            vec![base.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut dirs = Vec::new();
    let walker = WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry));
    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() && is_candidate_dir(entry.path())? {
            dirs.push(entry.into_path());
        } else {
            debug!("Not an exam directory: {}", entry.path().display());
        }
    }
    Ok(dirs)
}

/// Output file of the exam in `dir`: `<parent>/<dirname>.<extension>`
pub fn output_path_for(dir: &Path, extension: &str) -> Result<PathBuf> {
    let dir = match dir.file_name() {
        Some(_) => dir.to_path_buf(),
        None => std::fs::canonicalize(dir)?,
    };
    let name = dir.file_name().unwrap_or(dir.as_os_str()).to_string_lossy();
    let file_name = format!("{}.{}", name, extension);
    Ok(match dir.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    })
}

/// Checks an output file may be written
///
/// # Errors
///
/// [`RradarrError::OutputExists`] if the file exists and `force` is off
pub fn check_output(path: &Path, force: bool) -> Result<()> {
    if path.exists() {
        if !force {
            return Err(RradarrError::OutputExists(path.to_path_buf()));
        }
        warn!("Overwriting {}", path.display());
    }
    Ok(())
}

/// Reads and exports every exam found under `base`
///
/// Dry-run summaries are printed to `out`.
///
/// # Errors
///
/// - [`RradarrError::NoCandidateDirectories`] if no directory holds any file
/// - the first exam failure, unless `keep_going` is set
pub fn crunch<W: Write>(
    base: &Path,
    options: &BatchOptions,
    out: &mut W,
) -> Result<BatchSummary> {
    let base = clean_path(base);
    info!("Processing {}", base.display());

    let dirs = collect_exam_dirs(&base, options.recurse)?;
    if dirs.is_empty() {
        return Err(RradarrError::NoCandidateDirectories(base));
    }
    info!("Found {} candidate directories", dirs.len());

    let dictionary = ElementDictionary::standard();
    let mut summary = BatchSummary::default();
    for dir in dirs {
        match process_exam_dir(&dir, options, &dictionary, out) {
            Ok(Some(written)) => {
                summary.written.extend(written);
                summary.processed.push(dir);
            }
            Ok(None) => summary.skipped.push(dir),
            Err(e) if options.keep_going => {
                error!("{}", e);
                summary.failed.push((dir, e));
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Processed {} exams, skipped {}, {} failed",
        summary.processed.len(),
        summary.skipped.len(),
        summary.failed.len()
    );
    Ok(summary)
}

/// Reads the exam in `dir` and writes its exports
///
/// Returns the files written, or `None` if the directory holds no exam image.
fn process_exam_dir<W: Write>(
    dir: &Path,
    options: &BatchOptions,
    dictionary: &ElementDictionary,
    out: &mut W,
) -> Result<Option<Vec<PathBuf>>> {
    let exam_options = ExamOptions::default().sort_by(Some(SortCriterion::SliceLocation));
    let exam = Exam::open(dir, exam_options)?;
    if !exam.has_images() {
        info!(
            "Skipping {}: no exam image ({} scouts)",
            dir.display(),
            exam.scouts().len()
        );
        return Ok(None);
    }
    ensure_exportable(&exam)?;
    info!(
        "{}: {} images, {} scouts",
        exam.name(),
        exam.images().len(),
        exam.scouts().len()
    );

    let csv_path = output_path_for(dir, CSV_EXTENSION)?;
    let html_path = output_path_for(dir, HTML_EXTENSION)?;
    if options.write_csv {
        check_output(&csv_path, options.force)?;
    }
    if options.write_html {
        check_output(&html_path, options.force)?;
    }

    if options.dry_run {
        writeln!(out, "{}", ExamReport::new(&exam))?;
        return Ok(Some(Vec::new()));
    }

    let mut written = Vec::new();
    if options.write_csv {
        let file = BufWriter::new(File::create(&csv_path)?);
        let rows = CsvExport::new(&exam, dictionary).write_to(file)?;
        info!("Wrote {} rows to {}", rows, csv_path.display());
        written.push(csv_path);
    }
    if options.write_html {
        let file = BufWriter::new(File::create(&html_path)?);
        let points = ChartExport::new(&exam).write_to(file)?;
        info!("Charted {} images in {}", points, html_path.display());
        written.push(html_path);
    }
    Ok(Some(written))
}
