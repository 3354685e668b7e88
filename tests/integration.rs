//! Integration tests using TOML fixtures.
//!
//! This test harness loads test cases from TOML files in the `fixtures/` directory
//! and runs them against the bib-prune library.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// A test fixture loaded from a TOML file.
#[derive(Debug, Deserialize)]
struct Fixture {
    /// Name of the test case
    name: String,
    /// Concatenated LaTeX document text
    tex: String,
    /// Bibliography source (pruning fixtures only)
    #[serde(default)]
    bib: String,
    /// Expected set of cited keys
    #[serde(default)]
    expected_cited: Option<Vec<String>>,
    /// Expected keys of the cleaned bibliography, in order
    #[serde(default)]
    expected_used: Option<Vec<String>>,
    /// Expected keys of the backup, in order
    #[serde(default)]
    expected_removed: Option<Vec<String>>,
    /// Expected number of distinct entries in the original bibliography
    #[serde(default)]
    expected_total: Option<usize>,
    /// Expected number of parse warnings
    #[serde(default)]
    expected_warnings: Option<usize>,
    /// Expected cleaned output text
    #[serde(default)]
    expected_output: Option<String>,
}

/// Load all fixtures from a directory.
fn load_fixtures(dir: &Path) -> Vec<(String, Fixture)> {
    let mut fixtures = Vec::new();

    if !dir.exists() {
        return fixtures;
    }

    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();

        if path.extension().map_or(false, |e| e == "toml") {
            let content = fs::read_to_string(&path).unwrap();
            let fixture: Fixture = toml::from_str(&content).unwrap();
            let name = path.file_stem().unwrap().to_string_lossy().to_string();
            fixtures.push((name, fixture));
        }
    }

    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    fixtures
}

fn keys(entries: &[&bib_prune::BibEntry]) -> Vec<String> {
    entries.iter().map(|e| e.key.clone()).collect()
}

/// Run extraction tests - verify the cited key set.
fn run_extraction_test(name: &str, fixture: &Fixture) {
    let cited = bib_prune::extract_citation_keys(&fixture.tex);

    println!("Extraction test '{}': {} keys found", name, cited.len());

    if let Some(expected) = &fixture.expected_cited {
        let expected: HashSet<String> = expected.iter().cloned().collect();
        assert_eq!(cited, expected, "Test '{}' cited keys mismatch", name);
    }
}

/// Run pruning tests - parse, partition and render.
fn run_pruning_test(name: &str, fixture: &Fixture) {
    run_extraction_test(name, fixture);

    let cited = bib_prune::extract_citation_keys(&fixture.tex);
    let parsed = bib_prune::parse_bibliography(&fixture.bib);
    let parts = bib_prune::partition(&parsed.bibliography, &cited);

    if let Some(expected) = fixture.expected_total {
        assert_eq!(
            parsed.bibliography.len(),
            expected,
            "Test '{}' total entry count mismatch",
            name
        );
    }

    if let Some(expected) = &fixture.expected_used {
        assert_eq!(&keys(&parts.used), expected, "Test '{}' used keys mismatch", name);
    }

    if let Some(expected) = &fixture.expected_removed {
        assert_eq!(
            &keys(&parts.removed),
            expected,
            "Test '{}' removed keys mismatch",
            name
        );
    }

    if let Some(expected) = fixture.expected_warnings {
        assert_eq!(
            parsed.warnings.len(),
            expected,
            "Test '{}' warning count mismatch: {:?}",
            name,
            parsed.warnings
        );
    }

    if let Some(expected) = &fixture.expected_output {
        assert_eq!(
            bib_prune::render_entries(&parts.used).trim(),
            expected.trim(),
            "Test '{}' output mismatch",
            name
        );
    }
}

#[test]
fn test_extraction_fixtures() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/extraction");
    let fixtures = load_fixtures(&fixtures_dir);
    assert!(!fixtures.is_empty(), "No extraction fixtures found");

    for (name, fixture) in fixtures {
        println!("Running extraction test: {}", fixture.name);
        run_extraction_test(&name, &fixture);
    }
}

#[test]
fn test_pruning_fixtures() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pruning");
    let fixtures = load_fixtures(&fixtures_dir);
    assert!(!fixtures.is_empty(), "No pruning fixtures found");

    for (name, fixture) in fixtures {
        println!("Running pruning test: {}", fixture.name);
        run_pruning_test(&name, &fixture);
    }
}
