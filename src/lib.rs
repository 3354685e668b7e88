//! bib-prune: remove uncited entries from a BibTeX file bundled with LaTeX sources.
//!
//! This library provides functionality to:
//! - Read LaTeX documents and a bibliography from a ZIP archive
//! - Extract citation keys from `\cite`-family commands
//! - Split a `.bib` file into verbatim entries
//! - Write the cited entries and a backup of the removed ones

pub mod archive;
pub mod bibliography;
pub mod citations;
pub mod filter;
pub mod pipeline;
pub mod report;

pub use archive::{ArchiveError, Member, Selection, SourceArchive};
pub use bibliography::{
    parse_bibliography, BibEntry, Bibliography, ParseWarning, ParsedBibliography,
};
pub use citations::extract_citation_keys;
pub use filter::{
    backup_path, partition, render_entries, write_outputs, OutputPaths, Partition, Summary,
    WriteError, BACKUP_FILE_NAME,
};
pub use pipeline::{prune_archive, PruneError};
pub use report::Reporter;
