pub mod batch;
pub mod report;

use batch::BatchOptions;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for rradarr
///
/// Paired flags (`--csv`/`--no-csv`, ...) override each other; the last
/// one given wins.
#[derive(Parser, Debug)]
#[command(name = "rradarr")]
#[command(about = "Extract DICOM metadata and exposure charts from directories of CT exams")]
#[command(version)]
pub struct Cli {
    /// Base directory holding the DICOM images of one or more exams
    #[arg(value_name = "DICOM_BASE_DIR")]
    pub base_dir: PathBuf,

    /// Write a CSV file with every element of each exam image (default)
    #[arg(long, overrides_with = "no_csv")]
    pub csv: bool,

    /// Do not write CSV files
    #[arg(long, overrides_with = "csv")]
    pub no_csv: bool,

    /// Write an HTML chart of the exposure along each exam
    #[arg(long, overrides_with = "no_html")]
    pub html: bool,

    /// Do not write HTML charts (default)
    #[arg(long, overrides_with = "html")]
    pub no_html: bool,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,

    /// Process every directory under the base directory (default)
    #[arg(short, long, overrides_with = "no_recurse")]
    pub recurse: bool,

    /// Process the base directory only
    #[arg(long, overrides_with = "recurse")]
    pub no_recurse: bool,

    /// Read the exams and print a summary without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Log failing exams and go on with the next ones
    #[arg(long)]
    pub keep_going: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn write_csv(&self) -> bool {
        !self.no_csv
    }

    pub fn write_html(&self) -> bool {
        self.html
    }

    pub fn recurse(&self) -> bool {
        !self.no_recurse
    }

    /// Batch settings selected by the flags
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            write_csv: self.write_csv(),
            write_html: self.write_html(),
            force: self.force,
            recurse: self.recurse(),
            dry_run: self.dry_run,
            keep_going: self.keep_going,
        }
    }
}
