//! Output formatting for lectern results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for reading
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::batch::{BatchOutcome, FileFailure};
use crate::service::{AudioResponse, ContentMode, ProcessFileResponse, RenderedContent};

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report for a content run.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub content_type: String,
    pub files_processed: usize,
    pub failed: usize,
    pub results: Vec<JsonResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonResult {
    pub file: String,
    pub is_code: bool,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<JsonSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<JsonFinding>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonSection {
    pub title: String,
    pub body: String,
}

#[derive(Serialize, Deserialize)]
pub struct JsonFinding {
    pub kind: String,
    pub detector: String,
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct JsonError {
    pub file: String,
    pub status: u16,
    pub error: String,
    pub detail: String,
}

/// Build the JSON report for a content run.
pub fn build_json_report(path: &str, mode: ContentMode, outcome: &BatchOutcome) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        content_type: mode.to_string(),
        files_processed: outcome.processed(),
        failed: outcome.failures.len(),
        results: outcome.results.iter().map(result_to_json).collect(),
        errors: outcome.failures.iter().map(failure_to_json).collect(),
    }
}

/// Write a content run in JSON format.
pub fn write_json(path: &str, mode: ContentMode, outcome: &BatchOutcome) -> anyhow::Result<()> {
    let report = build_json_report(path, mode, outcome);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

/// Write any response envelope as pretty JSON.
pub fn write_envelope<T: Serialize>(envelope: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(envelope)?;
    println!("{}", json);
    Ok(())
}

fn result_to_json(r: &RenderedContent) -> JsonResult {
    JsonResult {
        file: display_path(&r.path),
        is_code: r.is_code,
        content: r.content.clone(),
        sections: r
            .document
            .as_ref()
            .map(|doc| {
                doc.sections()
                    .iter()
                    .map(|s| JsonSection {
                        title: s.title.clone(),
                        body: s.body.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        findings: r
            .findings
            .iter()
            .map(|f| JsonFinding {
                kind: f.kind.as_str().to_string(),
                detector: f.detector.to_string(),
                text: f.text.clone(),
            })
            .collect(),
    }
}

fn failure_to_json(f: &FileFailure) -> JsonError {
    JsonError {
        file: display_path(&f.path),
        status: f.error.status(),
        error: f.error.kind().to_string(),
        detail: f.error.to_string(),
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

// =============================================================================
// Pretty Format
// =============================================================================

fn write_header() {
    println!();
    print!("  ");
    print!("{}", "lectern".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
}

/// Write a content run in pretty (human-readable) format.
pub fn write_pretty(path: &str, mode: ContentMode, outcome: &BatchOutcome) {
    write_header();

    print!("  {}", "Reading: ".dimmed());
    println!("{}", path);
    print!("  {}", "Mode:    ".dimmed());
    println!("{}", mode);
    println!();

    for result in &outcome.results {
        write_result(result);
        println!();
    }

    if !outcome.failures.is_empty() {
        write_failures(&outcome.failures);
        println!();
    }

    write_final_status(outcome);
    println!();
}

fn write_result(result: &RenderedContent) {
    let badge = if result.is_code {
        "CODE".magenta()
    } else {
        "DOC ".blue()
    };
    println!("  {} {}", badge, display_path(&result.path).bold());
    println!();
    for line in result.content.lines() {
        if line.is_empty() {
            println!();
        } else {
            println!("    {}", line);
        }
    }
}

fn write_failures(failures: &[FileFailure]) {
    println!("  {} ({}):", "Failed".bold(), failures.len());
    println!();
    for f in failures {
        print!("    {} ", "ERROR".red());
        print!("{:<24}", f.error.kind().dimmed());
        println!("{}", display_path(&f.path).blue());
        println!("            {}", f.error);
    }
}

fn write_final_status(outcome: &BatchOutcome) {
    print!(
        "  {}",
        format!("{} file(s) processed", outcome.processed()).dimmed()
    );
    print!("  ");
    if outcome.failures.is_empty() {
        print!("{}", "OK".green());
    } else {
        print!("{}", format!("{} FAILED", outcome.failures.len()).red());
    }
    println!();
}

/// Write a process-file result.
pub fn write_process_pretty(path: &Path, resp: &ProcessFileResponse) {
    write_header();
    print!("  {}", "File:    ".dimmed());
    println!("{}", display_path(path));
    print!("  {}", "Type:    ".dimmed());
    println!("{} ({})", resp.file_type, resp.content_type);
    print!("  {}", "Length:  ".dimmed());
    println!("{} characters", resp.content_length);
    println!();
    println!("  {}", "Preview:".bold());
    for line in resp.preview.lines() {
        println!("    {}", line);
    }
    println!();
}

/// Write a generate-audio result.
pub fn write_audio_pretty(resp: &AudioResponse) {
    print!("  {}", "✓ Audio".green());
    println!("  {}", resp.audio_path);
    print!("  {}", "URL:".dimmed());
    println!(" {}", resp.audio_url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessError;
    use crate::finding::{Finding, FindingKind};
    use crate::narrative::{NarrativeDocument, Section};
    use std::path::PathBuf;

    fn outcome() -> BatchOutcome {
        let mut doc = NarrativeDocument::new();
        doc.push(Section::new("Topic", "This document outlines a software development project."));
        BatchOutcome {
            results: vec![RenderedContent {
                path: PathBuf::from("docs/brief.txt"),
                mode: ContentMode::Summary,
                is_code: false,
                content: "This document outlines a software development project.".to_string(),
                document: Some(doc),
                findings: vec![Finding::new(FindingKind::TechStackItem, "tech_stack", "Frontend: React")],
            }],
            failures: vec![FileFailure {
                path: PathBuf::from("docs/broken.pdf"),
                error: ProcessError::extraction("PDF", anyhow::anyhow!("bad xref")),
            }],
        }
    }

    #[test]
    fn test_json_report_shape() {
        let report = build_json_report("docs", ContentMode::Summary, &outcome());
        assert_eq!(report.content_type, "summary");
        assert_eq!(report.files_processed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.results[0].file, "docs/brief.txt");
        assert_eq!(report.results[0].sections[0].title, "Topic");
        assert_eq!(report.results[0].findings[0].text, "Frontend: React");
        assert_eq!(report.errors[0].status, 500);
        assert_eq!(report.errors[0].detail, "PDF extraction failed: bad xref");
    }

    #[test]
    fn test_json_round_trips() {
        let report = build_json_report("docs", ContentMode::Full, &outcome());
        let json = serde_json::to_string(&report).unwrap();
        let parsed: JsonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.results[0].findings[0].kind, report.results[0].findings[0].kind);
    }
}
