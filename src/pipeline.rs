//! End-to-end pruning of a source archive.
//!
//! Reads every document and the bibliography from the archive, works out
//! which entries are cited, then writes the cleaned bibliography and the
//! backup of removed entries.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::archive::{ArchiveError, SourceArchive, BIB_EXTENSION, TEX_EXTENSION};
use crate::bibliography::parse_bibliography;
use crate::citations::extract_citation_keys;
use crate::filter::{partition, write_outputs, Summary, WriteError};
use crate::report::Reporter;

/// Any failure that ends a run.
#[derive(Error, Debug)]
pub enum PruneError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Prunes the first bibliography in `archive` down to the entries cited by
/// its LaTeX documents and writes the result to `output`.
///
/// Removed entries go to `remove.bib.bak` beside `output`. Nothing is written
/// unless every member was read and decoded successfully.
pub fn prune_archive<W: Write>(
    archive: &Path,
    output: &Path,
    reporter: &mut Reporter<W>,
) -> Result<Summary, PruneError> {
    reporter.rule("Bibliography cleanup");

    let mut archive = SourceArchive::open(archive)?;
    reporter.status(format!(
        "{} files found: {}",
        TEX_EXTENSION,
        archive.documents().len()
    ));
    reporter.status(format!(
        "{} files found: {}",
        BIB_EXTENSION,
        archive.bibliographies().len()
    ));

    let selection = archive.select()?;
    if archive.bibliographies().len() > 1 {
        reporter.warning(format!(
            "using '{}'; other {} files are ignored",
            selection.bibliography.name, BIB_EXTENSION
        ));
    }

    // 1. Read and concatenate every document
    let total_docs = selection.documents.len();
    let mut tex = String::new();
    for (i, member) in selection.documents.iter().enumerate() {
        reporter.status(format!("reading {} ({}/{})", member.name, i + 1, total_docs));
        tex.push_str(&archive.read_text(member)?);
    }

    // 2. Collect cited keys
    let cited = extract_citation_keys(&tex);
    reporter.status(format!("cited keys found: {}", cited.len()));

    // 3. Read and split the bibliography
    reporter.status(format!("reading {}", selection.bibliography.name));
    let bib = archive.read_text(&selection.bibliography)?;
    drop(archive);

    let parsed = parse_bibliography(&bib);
    for warning in &parsed.warnings {
        reporter.warning(format!("{}: {}", selection.bibliography.name, warning));
    }
    let bibliography = parsed.bibliography;
    reporter.status(format!(
        "entries in original bibliography: {}",
        bibliography.len()
    ));

    // 4. Partition and write
    let parts = partition(&bibliography, &cited);
    let paths = write_outputs(&parts, output)?;
    reporter.success(format!("cleaned bibliography written: {}", paths.output.display()));
    reporter.success(format!("removed entries saved to: {}", paths.backup.display()));

    let summary = Summary {
        total: bibliography.len(),
        cited_keys: cited.len(),
        used: parts.used.len(),
        removed: parts.removed.len(),
        output_path: paths.output,
        backup_path: paths.backup,
    };
    reporter.summary(&summary);
    reporter.rule("Done");

    Ok(summary)
}
