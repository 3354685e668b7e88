//! LaTeX citation extractor.
//!
//! Finds `\cite{...}` commands and their variants (`\citep`, `\citet`,
//! `\citeauthor`, ...) and collects the keys they reference.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Matches `\cite` followed by any word characters and a brace-delimited key list.
static CITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\cite\w*\{([^}]+)\}").expect("citation regex is valid"));

/// Extracts the set of citation keys used in the given LaTeX text.
///
/// Each key list is split on commas and every fragment is trimmed of
/// surrounding whitespace and recorded, including the empty one left by a
/// trailing comma. Keys are compared exactly; no case folding is done.
///
/// # Examples
///
/// ```
/// use bib_prune::extract_citation_keys;
///
/// let keys = extract_citation_keys(r"\cite{foo} and \citep{bar, baz}");
/// assert_eq!(keys.len(), 3);
/// assert!(keys.contains("baz"));
/// ```
pub fn extract_citation_keys(tex: &str) -> HashSet<String> {
    let mut keys = HashSet::new();

    for cap in CITE_RE.captures_iter(tex) {
        for key in cap[1].split(',') {
            keys.insert(key.trim().to_string());
        }
    }

    keys
}
