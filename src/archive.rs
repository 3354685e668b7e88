//! ZIP archive access.
//!
//! Lists the members of a source archive, picks out the LaTeX documents and
//! the bibliography, and reads them as UTF-8 text.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

/// Suffix identifying LaTeX documents inside the archive.
pub const TEX_EXTENSION: &str = ".tex";

/// Suffix identifying bibliography files inside the archive.
pub const BIB_EXTENSION: &str = ".bib";

/// Errors that can occur when opening or reading the archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("archive '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied reading '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("'{}' is not a valid ZIP archive or is damaged: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("no .bib file found in the archive")]
    MissingBibliography,

    #[error("no .tex file found in the archive")]
    MissingDocuments,

    #[error("'{member}' is not UTF-8 encoded")]
    InvalidEncoding { member: String },

    #[error("unexpected error reading '{}': {source}", path.display())]
    Unexpected {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file stored in the archive, identified by its position in the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub index: usize,
    pub name: String,
}

/// The members a run works on: every document and one bibliography.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// All `.tex` members, in archive order
    pub documents: Vec<Member>,
    /// The first `.bib` member in archive order
    pub bibliography: Member,
}

/// An open ZIP archive holding LaTeX sources.
pub struct SourceArchive {
    path: PathBuf,
    zip: ZipArchive<File>,
    documents: Vec<Member>,
    bibliographies: Vec<Member>,
}

impl SourceArchive {
    /// Opens the archive and classifies its members by extension.
    ///
    /// No member content is read here.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ArchiveError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => ArchiveError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => ArchiveError::Unexpected {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let zip = ZipArchive::new(file).map_err(|e| corrupt(path, e))?;

        let mut documents = Vec::new();
        let mut bibliographies = Vec::new();
        for index in 0..zip.len() {
            let Some(name) = zip.name_for_index(index) else {
                continue;
            };
            let member = Member {
                index,
                name: name.to_string(),
            };
            if name.ends_with(TEX_EXTENSION) {
                documents.push(member);
            } else if name.ends_with(BIB_EXTENSION) {
                bibliographies.push(member);
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            zip,
            documents,
            bibliographies,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All `.tex` members, in archive order.
    pub fn documents(&self) -> &[Member] {
        &self.documents
    }

    /// All `.bib` members, in archive order. Only the first one is used.
    pub fn bibliographies(&self) -> &[Member] {
        &self.bibliographies
    }

    /// Picks the members to process.
    ///
    /// The bibliography is checked before the documents, so an archive with
    /// neither reports the missing bibliography.
    pub fn select(&self) -> Result<Selection, ArchiveError> {
        let bibliography = self
            .bibliographies
            .first()
            .cloned()
            .ok_or(ArchiveError::MissingBibliography)?;

        if self.documents.is_empty() {
            return Err(ArchiveError::MissingDocuments);
        }

        Ok(Selection {
            documents: self.documents.clone(),
            bibliography,
        })
    }

    /// Reads a member and decodes it as UTF-8.
    pub fn read_text(&mut self, member: &Member) -> Result<String, ArchiveError> {
        let mut bytes = Vec::new();
        {
            let mut entry = self
                .zip
                .by_index(member.index)
                .map_err(|e| corrupt(&self.path, e))?;
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| corrupt(&self.path, ZipError::Io(e)))?;
        }

        String::from_utf8(bytes).map_err(|_| ArchiveError::InvalidEncoding {
            member: member.name.clone(),
        })
    }
}

fn corrupt(path: &Path, source: ZipError) -> ArchiveError {
    ArchiveError::Corrupt {
        path: path.to_path_buf(),
        source,
    }
}
