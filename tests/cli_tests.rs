//! Command-line tests for the prot-match binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const REFERENCES: &str = ">tryptophans\nWWWWWWWW\n>target\nKLMNPIEPCMGA\n";

const TOY_MATRIX: &str = "\
$ A C *
A  2 -1 -1
C -1  2 -1
* -1 -1  1
";

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".txt").unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn prot_match() -> Command {
    Command::cargo_bin("prot-match").unwrap()
}

#[test]
fn test_search_text_output() {
    let refs = temp_file(REFERENCES);
    prot_match()
        .args(["search", "--query", "PIEPCMGA", "--references"])
        .arg(refs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 target (score 47)"))
        .stdout(predicate::str::contains("Reference: PIEPCMGA"));
}

#[test]
fn test_search_json_output() {
    let refs = temp_file(REFERENCES);
    let output = prot_match()
        .args(["--format", "json", "search", "-q", "PIEPCMGA", "-r"])
        .arg(refs.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let best = &json["queries"][0]["matches"][0];
    assert_eq!(best["reference"], "target");
    assert_eq!(best["score"], 47);
    assert_eq!(best["index"], 1);
    assert_eq!(json["config"]["traceback"], "boundary");
}

#[test]
fn test_search_query_file_tsv() {
    let refs = temp_file(REFERENCES);
    let queries = temp_file(">q1\nPIEPCMGA\n>q2\nWWWW\n");
    prot_match()
        .args(["--format", "tsv", "search", "-n", "2", "-r"])
        .arg(refs.path())
        .arg("--query-file")
        .arg(queries.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("query\trank\treference\tscore"))
        .stdout(predicate::str::contains("q1\t1\ttarget\t47"))
        .stdout(predicate::str::contains("q2\t1\ttryptophans\t44"));
}

#[test]
fn test_search_without_match_continues() {
    let refs = temp_file(">tryptophans\nWWWWWWWW\n");
    prot_match()
        .args(["search", "-q", "PIEP", "-r"])
        .arg(refs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching reference found."));
}

#[test]
fn test_search_empty_reference_file() {
    let refs = temp_file("");
    prot_match()
        .args(["search", "-q", "PIEP", "-r"])
        .arg(refs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reference collection is empty"));
}

#[test]
fn test_search_requires_a_query() {
    let refs = temp_file(REFERENCES);
    prot_match()
        .args(["search", "-r"])
        .arg(refs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No queries given"));
}

#[test]
fn test_search_rejects_gap_in_query() {
    let refs = temp_file(REFERENCES);
    prot_match()
        .args(["search", "-q", "PIE*P", "-r"])
        .arg(refs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid symbol"));
}

#[test]
fn test_search_rejects_gap_in_query_file() {
    let refs = temp_file(REFERENCES);
    let queries = temp_file(">ok\nPIEPCMGA\n>gapped\nPIE*PCMGA\n");
    prot_match()
        .args(["search", "-r"])
        .arg(refs.path())
        .arg("--query-file")
        .arg(queries.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Query gapped"))
        .stderr(predicate::str::contains("invalid symbol"));
}

#[test]
fn test_search_rejects_unscored_query_symbol() {
    let refs = temp_file(REFERENCES);
    prot_match()
        .args(["search", "-q", "piep", "-r"])
        .arg(refs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Query 'piep' uses symbols the matrix does not score",
        ))
        .stderr(predicate::str::contains("No penalty registered"));
}

#[test]
fn test_search_rejects_unscored_reference_symbol() {
    let refs = temp_file(">target\nPIEPCMGA\n>odd\nPIEPJ\n");
    prot_match()
        .args(["search", "-q", "PIEP", "-r"])
        .arg(refs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reference 'odd'"));
}

#[test]
fn test_align_with_custom_matrix() {
    let matrix = temp_file(TOY_MATRIX);
    prot_match()
        .args(["align", "ACA", "AA", "--matrix"])
        .arg(matrix.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 3"))
        .stdout(predicate::str::contains("A: ACA"))
        .stdout(predicate::str::contains("B: A*A"));
}

#[test]
fn test_align_unknown_pair() {
    let matrix = temp_file(TOY_MATRIX);
    prot_match()
        .args(["align", "ACGT", "ACGT", "-m"])
        .arg(matrix.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No penalty registered"));
}

#[test]
fn test_matrix_prints_embedded_blosum62() {
    prot_match()
        .arg("matrix")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$ A  R  N  D"))
        .stdout(predicate::str::contains("W -3 -3 -4 -4 -2 -2 -3 -2 -2 -3 -2 -3 -1  1 -4 -3 -2 11"));
}

#[test]
fn test_export_legacy_window() {
    let input = temp_file(">long\nABCDEFGHIJKLMNOPQRSTUVWXYZ\n>short\nABC\n");
    let output = NamedTempFile::with_suffix(".txt").unwrap();
    prot_match()
        .arg("export")
        .arg(input.path())
        .arg("--output")
        .arg(output.path())
        .arg("--legacy-window")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 of 2 sequences"))
        .stderr(predicate::str::contains("too short for legacy window"));

    let written = std::fs::read_to_string(output.path()).unwrap();
    assert_eq!(written, ">long\nKLMNOPQRST\n");
}
