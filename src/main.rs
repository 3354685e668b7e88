//! CLI for bib-prune - Remove uncited entries from a bibliography bundled with LaTeX sources.

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use bib_prune::{prune_archive, ArchiveError, PruneError, Reporter, WriteError};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Remove .bib entries that are not cited in the .tex files of a ZIP archive
#[derive(Parser)]
#[command(name = "bib-prune")]
#[command(version)]
#[command(after_help = "\
Examples:
  bib-prune project.zip references_clean.bib
  bib-prune submission.zip out/refs.bib

Entries that are not cited are saved to remove.bib.bak next to the output file.")]
struct Cli {
    /// ZIP archive containing the .tex files and at least one .bib file
    archive: PathBuf,

    /// Path of the cleaned .bib file to write
    output: PathBuf,
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — archive path does not exist
    ArchiveNotFound(String),
    /// Exit 11 — archive is not a valid ZIP or cannot be read
    CorruptArchive(String),
    /// Exit 12 — archive holds no .bib file
    MissingBibliography(String),
    /// Exit 13 — archive holds no .tex file
    MissingDocuments(String),
    /// Exit 14 — a member is not UTF-8 text
    InvalidEncoding(String),
    /// Exit 15 — read or write access refused
    PermissionDenied { message: String, output: bool },
    /// Exit 16 — cleaned or backup file could not be written
    OutputWrite(String),
    /// Exit 1 — anything else
    Unexpected(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::ArchiveNotFound(_) => 10,
            AppError::CorruptArchive(_) => 11,
            AppError::MissingBibliography(_) => 12,
            AppError::MissingDocuments(_) => 13,
            AppError::InvalidEncoding(_) => 14,
            AppError::PermissionDenied { .. } => 15,
            AppError::OutputWrite(_) => 16,
            AppError::Unexpected(_) => 1,
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::ArchiveNotFound(_) => Some("verify the archive path is correct"),
            AppError::CorruptArchive(_) => Some("the input must be a ZIP archive"),
            AppError::MissingBibliography(_) => {
                Some("add your .bib file to the archive alongside the .tex files")
            }
            AppError::MissingDocuments(_) => {
                Some("add the .tex files that cite the bibliography to the archive")
            }
            AppError::InvalidEncoding(_) => Some("re-save the file with UTF-8 encoding"),
            AppError::PermissionDenied { output: false, .. } => {
                Some("check that the archive is readable")
            }
            AppError::PermissionDenied { output: true, .. } | AppError::OutputWrite(_) => {
                Some("check that the output directory exists and is writable")
            }
            AppError::Unexpected(_) => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ArchiveNotFound(msg)
            | AppError::CorruptArchive(msg)
            | AppError::MissingBibliography(msg)
            | AppError::MissingDocuments(msg)
            | AppError::InvalidEncoding(msg)
            | AppError::PermissionDenied { message: msg, .. }
            | AppError::OutputWrite(msg) => write!(f, "{}", msg),
            AppError::Unexpected(msg) => write!(f, "unexpected error: {}", msg),
        }
    }
}

impl From<PruneError> for AppError {
    fn from(e: PruneError) -> Self {
        match e {
            PruneError::Archive(e) => map_archive_error(e),
            PruneError::Write(e) => map_write_error(e),
        }
    }
}

fn map_archive_error(e: ArchiveError) -> AppError {
    let message = e.to_string();
    match e {
        ArchiveError::NotFound { .. } => AppError::ArchiveNotFound(message),
        ArchiveError::Corrupt { .. } => AppError::CorruptArchive(message),
        ArchiveError::MissingBibliography => AppError::MissingBibliography(message),
        ArchiveError::MissingDocuments => AppError::MissingDocuments(message),
        ArchiveError::InvalidEncoding { .. } => AppError::InvalidEncoding(message),
        ArchiveError::PermissionDenied { .. } => AppError::PermissionDenied {
            message,
            output: false,
        },
        ArchiveError::Unexpected { .. } => AppError::Unexpected(message),
    }
}

fn map_write_error(e: WriteError) -> AppError {
    let message = e.to_string();
    match e {
        WriteError::PermissionDenied { .. } => AppError::PermissionDenied {
            message,
            output: true,
        },
        WriteError::Failed { .. } => AppError::OutputWrite(message),
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    let mut reporter = Reporter::stderr();

    if let Err(e) = prune_archive(&cli.archive, &cli.output, &mut reporter) {
        let e = AppError::from(e);
        reporter.error(&e, e.hint());
        process::exit(e.exit_code());
    }
}
