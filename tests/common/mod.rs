//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Bibliography used by most end-to-end tests: three entries, two of which
/// are cited by [`CITING_DOCUMENT`].
pub const SAMPLE_BIB: &str = "\
@article{foo,
  author = {Doe, Jane},
  title = {On Foo},
  year = {2020}
}

@book{bar,
  title = {The Bar Book},
  year = {2018}
}

@misc{qux,
  note = {Never cited}
}";

/// Document citing `foo`, `bar` and the unknown key `baz`.
pub const CITING_DOCUMENT: &str = r"\section{Intro}
Prior work \cite{foo}\citep{bar,baz} shows this.";

/// Writes a ZIP archive named `name` into `dir` with the given members, in order.
pub fn build_archive(dir: &Path, name: &str, members: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    let mut writer = ZipWriter::new(File::create(&path).unwrap());
    for (member, bytes) in members {
        writer
            .start_file(*member, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// Sorted keys of a parsed bibliography text.
pub fn bib_keys(text: &str) -> Vec<String> {
    let mut keys: Vec<String> = bib_prune::parse_bibliography(text)
        .bibliography
        .keys()
        .map(|k| k.to_string())
        .collect();
    keys.sort();
    keys
}
