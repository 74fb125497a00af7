use clap::Parser;
use log::error;
use rradarr_core::cli::Cli;
use rradarr_core::{crunch, RradarrError};
use std::process;

/// Exit status when no directory under the base path holds any file
const EXIT_NO_CANDIDATES: i32 = 2;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let options = cli.batch_options();
    let mut stdout = std::io::stdout().lock();
    match crunch(&cli.base_dir, &options, &mut stdout) {
        Ok(summary) if summary.has_failures() => {
            for (dir, e) in &summary.failed {
                eprintln!("Error: {}: {}", dir.display(), e);
            }
            process::exit(1);
        }
        Ok(_) => {}
        Err(e @ RradarrError::NoCandidateDirectories(_)) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(EXIT_NO_CANDIDATES);
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
