//! Splitting a bibliography into cited and uncited entries, and writing
//! both halves to disk.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::bibliography::{BibEntry, Bibliography};

/// File name of the backup holding removed entries, placed next to the output.
pub const BACKUP_FILE_NAME: &str = "remove.bib.bak";

/// Separator placed between entries in written files.
const ENTRY_SEPARATOR: &str = "\n\n";

/// Errors that can occur when writing the output files.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("permission denied writing '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("failed to write '{}': {source}", path.display())]
    Failed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    /// The file that could not be written.
    pub fn path(&self) -> &Path {
        match self {
            WriteError::PermissionDenied { path } | WriteError::Failed { path, .. } => path,
        }
    }
}

/// Bibliography entries split by whether they are cited.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    /// Entries whose key is cited, in bibliography order
    pub used: Vec<&'a BibEntry>,
    /// Entries whose key is never cited, in bibliography order
    pub removed: Vec<&'a BibEntry>,
}

/// Where the two output files were written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub output: PathBuf,
    pub backup: PathBuf,
}

/// Counts and paths describing a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Distinct entries in the original bibliography
    pub total: usize,
    /// Distinct keys cited across all documents
    pub cited_keys: usize,
    /// Entries kept in the cleaned file
    pub used: usize,
    /// Entries moved to the backup file
    pub removed: usize,
    pub output_path: PathBuf,
    pub backup_path: PathBuf,
}

/// Splits the bibliography into cited and uncited entries.
///
/// Every entry lands in exactly one side; order within each side follows the
/// bibliography.
pub fn partition<'a>(bibliography: &'a Bibliography, cited: &HashSet<String>) -> Partition<'a> {
    let (used, removed): (Vec<&BibEntry>, Vec<&BibEntry>) = bibliography
        .iter()
        .partition(|entry| cited.contains(&entry.key));

    Partition { used, removed }
}

/// Joins entries with a blank line between them.
pub fn render_entries(entries: &[&BibEntry]) -> String {
    entries
        .iter()
        .map(|e| e.raw_text.as_str())
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

/// Location of the backup file for a given output path.
pub fn backup_path(output: &Path) -> PathBuf {
    match output.parent() {
        Some(dir) => dir.join(BACKUP_FILE_NAME),
        None => PathBuf::from(BACKUP_FILE_NAME),
    }
}

/// Writes the cleaned bibliography to `output` and the removed entries to the
/// backup file next to it, replacing any existing content.
///
/// The cleaned file is written first. If that fails the backup is not
/// attempted; if the backup fails the cleaned file stays in place.
pub fn write_outputs(partition: &Partition<'_>, output: &Path) -> Result<OutputPaths, WriteError> {
    write_file(output, &render_entries(&partition.used))?;

    let backup = backup_path(output);
    write_file(&backup, &render_entries(&partition.removed))?;

    Ok(OutputPaths {
        output: output.to_path_buf(),
        backup,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), WriteError> {
    fs::write(path, content).map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, e: io::Error) -> WriteError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => WriteError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => WriteError::Failed {
            path: path.to_path_buf(),
            source: e,
        },
    }
}
