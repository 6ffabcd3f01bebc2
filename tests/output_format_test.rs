//! Batch runs over testdata/ rendered into the JSON report.

use std::path::PathBuf;

use lectern::batch::{collect_files, run_batch};
use lectern::report::{build_json_report, JsonReport};
use lectern::{Config, ContentMode};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

#[test]
fn test_collects_every_fixture() {
    let files = collect_files(&testdata_path(), &Config::default()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["LinkedList.java", "greeter.js", "notes.txt", "project_brief.txt", "sort.py"]
    );
}

#[test]
fn test_summary_report() {
    let root = testdata_path();
    let files = collect_files(&root, &Config::default()).unwrap();
    let outcome = run_batch(&files, ContentMode::Summary, false);
    let report = build_json_report("testdata", ContentMode::Summary, &outcome);

    assert_eq!(report.content_type, "summary");
    assert_eq!(report.files_processed, 5);
    assert_eq!(report.failed, 0);
    assert!(report.errors.is_empty());

    let code: Vec<_> = report.results.iter().filter(|r| r.is_code).collect();
    assert_eq!(code.len(), 3);
    for result in &code {
        assert!(result.content.starts_with("TARGET: WHAT THIS CODE DOES:"), "{}", result.file);
        assert!(!result.sections.is_empty());
        assert!(result.findings.iter().any(|f| f.kind == "program_type"));
    }

    let brief = report
        .results
        .iter()
        .find(|r| r.file.ends_with("project_brief.txt"))
        .expect("brief in report");
    assert!(!brief.is_code);
    assert_eq!(brief.sections[0].title, "Topic");
    assert!(brief.findings.iter().any(|f| f.text == "Database: MongoDB"));
}

#[test]
fn test_full_report_keeps_document_text() {
    let files = vec![testdata_path().join("notes.txt")];
    let outcome = run_batch(&files, ContentMode::Full, false);
    let report = build_json_report("notes.txt", ContentMode::Full, &outcome);

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].content.trim(), "Remember to water the plants.");
    assert!(report.results[0].sections.is_empty());
    assert!(report.results[0].findings.is_empty());
}

#[test]
fn test_report_serializes_failures() {
    let files = vec![testdata_path().join("missing.txt")];
    let outcome = run_batch(&files, ContentMode::Summary, false);
    let report = build_json_report("testdata", ContentMode::Summary, &outcome);

    let json = serde_json::to_string(&report).unwrap();
    let parsed: JsonReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.failed, 1);
    assert_eq!(parsed.errors[0].status, 500);
    assert_eq!(parsed.errors[0].error, "extraction_failure");
    assert!(parsed.errors[0].detail.starts_with("Text file extraction failed"));
}
