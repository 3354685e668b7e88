//! BibTeX entry splitting.
//!
//! Splits a `.bib` file into verbatim entry blocks keyed by their citation
//! key. The parser does not interpret field syntax; an entry is simply every
//! line from one `@type{key,` header up to the next header.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Matches an entry header such as `@article{key,` and captures the key.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@\w+\{([^,]+),").expect("header regex is valid"));

/// A single bibliography entry, kept exactly as written in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct BibEntry {
    /// The citation key from the header line
    pub key: String,
    /// The entry's lines, header included, joined with `\n`
    pub raw_text: String,
}

/// Entries of a bibliography file, in the order their keys first appear.
#[derive(Debug, Clone, Default)]
pub struct Bibliography {
    entries: Vec<BibEntry>,
    index: HashMap<String, usize>,
}

impl Bibliography {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&BibEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BibEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Stores an entry. A key seen before keeps its position but takes the
    /// new text. Returns `true` when an earlier entry was overwritten.
    fn insert(&mut self, entry: BibEntry) -> bool {
        match self.index.get(&entry.key) {
            Some(&i) => {
                self.entries[i] = entry;
                true
            }
            None => {
                self.index.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
                false
            }
        }
    }
}

/// Something in the source file that was accepted but probably not intended.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseWarning {
    /// A line starting with `@` whose key could not be read; the block it
    /// opens is dropped.
    MalformedHeader { line: usize, header: String },
    /// A key defined more than once; the later definition wins.
    DuplicateKey { key: String, line: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MalformedHeader { line, header } => {
                write!(f, "line {}: skipped entry with unreadable key: {}", line, header)
            }
            ParseWarning::DuplicateKey { key, line } => {
                write!(
                    f,
                    "line {}: duplicate key '{}' replaces the earlier definition",
                    line, key
                )
            }
        }
    }
}

/// Result of parsing a bibliography file.
#[derive(Debug, Clone, Default)]
pub struct ParsedBibliography {
    pub bibliography: Bibliography,
    pub warnings: Vec<ParseWarning>,
}

/// Entry currently being accumulated.
struct OpenEntry<'a> {
    key: Option<String>,
    header_line: usize,
    lines: Vec<&'a str>,
}

/// Splits BibTeX source text into entries.
///
/// A line whose trimmed content starts with `@` begins a new entry. The key
/// is read from the header with the pattern `@type{key,` anchored at the very
/// start of the line; headers that do not fit this shape (an indented header,
/// or `@comment{...}` and `@string{...}` without a comma) open a block that is
/// discarded and reported as a warning. Text before the first header is
/// ignored.
///
/// # Examples
///
/// ```
/// use bib_prune::parse_bibliography;
///
/// let bib = "@book{knuth,\n  title = {TAOCP}\n}\n";
/// let parsed = parse_bibliography(bib);
/// assert_eq!(parsed.bibliography.len(), 1);
/// assert!(parsed.bibliography.contains_key("knuth"));
/// ```
pub fn parse_bibliography(content: &str) -> ParsedBibliography {
    let mut parsed = ParsedBibliography::default();
    let mut current: Option<OpenEntry> = None;

    for (idx, line) in split_lines(content).into_iter().enumerate() {
        let line_num = idx + 1;

        if line.trim().starts_with('@') {
            if let Some(open) = current.take() {
                finalize(open, &mut parsed);
            }

            let key = header_key(line);
            if key.is_none() {
                parsed.warnings.push(ParseWarning::MalformedHeader {
                    line: line_num,
                    header: line.trim().to_string(),
                });
            }

            current = Some(OpenEntry {
                key,
                header_line: line_num,
                lines: vec![line],
            });
        } else if let Some(open) = current.as_mut() {
            open.lines.push(line);
        }
    }

    if let Some(open) = current.take() {
        finalize(open, &mut parsed);
    }

    parsed
}

/// Splits text at every Unicode line boundary: `\n`, `\r\n`, a lone `\r`,
/// vertical tab, form feed, the file/group/record separators, NEL, and the
/// line and paragraph separators. A trailing terminator does not produce an
/// empty final line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = content.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&content[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Reads the key out of a header line, if it has one.
fn header_key(line: &str) -> Option<String> {
    let caps = HEADER_RE.captures(line)?;
    let key = caps[1].trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

fn finalize(open: OpenEntry, parsed: &mut ParsedBibliography) {
    let Some(key) = open.key else {
        return;
    };

    let entry = BibEntry {
        key: key.clone(),
        raw_text: open.lines.join("\n"),
    };

    if parsed.bibliography.insert(entry) {
        parsed.warnings.push(ParseWarning::DuplicateKey {
            key,
            line: open.header_line,
        });
    }
}
