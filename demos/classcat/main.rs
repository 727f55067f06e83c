//! Prints a summary of class files.
//!
//! ```text
//! cargo run --example classcat -- --verify-roundtrip path/to/Foo.class path/to/classes/
//! ```
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use classkit::jvm::bytecode::{ClassFile, DecodeError, EncodeError};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Summary printer
mod printer;

/// Command line arguments
#[derive(Parser)]
#[command(name = "classcat")]
#[command(about = "Prints a summary of class files", long_about = None)]
struct Args {
    /// Class files, or directories to search for class files
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Re-encode each class file and check that the bytes are unchanged
    #[arg(long = "verify-roundtrip")]
    verify_roundtrip: bool,
}

#[derive(Debug, Error)]
enum CatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Malformed class file: {0}")]
    Decode(#[from] DecodeError),
    #[error("Failed to re-encode: {0}")]
    Encode(#[from] EncodeError),
    #[error("Failed to summarize: {0}")]
    Summary(#[from] printer::SummaryError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut failures = 0usize;
    for path in &args.paths {
        match class_files_in(path) {
            Ok(files) => {
                for file in files {
                    if let Err(err) = cat(&file, args.verify_roundtrip) {
                        eprintln!("{}: {err}", file.display());
                        failures += 1;
                    }
                }
            }
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failures += 1;
            }
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        info!(failures, "some class files could not be read");
        ExitCode::FAILURE
    }
}

/// Expands a directory to the class files below it.
fn class_files_in(path: &Path) -> Result<Vec<PathBuf>, CatError> {
    if !path.is_dir() {
        return Ok(vec![path.to_owned()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        let is_class = entry.path().extension().is_some_and(|ext| ext == "class");
        if entry.file_type().is_file() && is_class {
            files.push(entry.into_path());
        }
    }
    debug!(dir = %path.display(), count = files.len(), "collected class files");
    Ok(files)
}

/// Prints the summary of one class file. Nothing is printed unless the whole file decodes.
fn cat(path: &Path, verify_roundtrip: bool) -> Result<(), CatError> {
    let bytes = fs::read(path)?;
    let class_file = ClassFile::parse(&bytes)?;
    let mut summary = printer::summarize(&class_file)?;
    if verify_roundtrip {
        let identical = class_file.encode()? == bytes;
        summary.push_str(if identical {
            "round trip: identical\n"
        } else {
            "round trip: DIFFERENT\n"
        });
    }
    println!("Classfile {}", path.display());
    print!("{summary}");
    println!();
    Ok(())
}
