//! Runs the explanation stages and assembles the narrative.

use serde::Serialize;
use tracing::debug;

use super::algorithms::detect_algorithms;
use super::concepts::detect_concepts;
use super::language_features::detect_language_features;
use super::outcomes::{summary_sentence, synthesize_outcomes};
use super::program_type::{detect_program_type, ProgramType};
use super::syntax::{scan_syntax, ClassDescriptor, FunctionDescriptor};
use super::CodeSignals;
use crate::finding::{Finding, FindingKind};
use crate::narrative::{audio_safe, NarrativeDocument, Section};
use crate::source::{language_name, SourceArtifact};

/// Classes listed in the narrative; the title still shows the full count.
pub const MAX_LISTED_CLASSES: usize = 10;
/// Functions listed in the narrative; the title still shows the full count.
pub const MAX_LISTED_FUNCTIONS: usize = 15;

/// Everything learned about a code body, plus the rendered narrative.
#[derive(Debug, Clone, Serialize)]
pub struct CodeExplanation {
    pub language: &'static str,
    pub program_type: ProgramType,
    pub classes: Vec<ClassDescriptor>,
    pub functions: Vec<FunctionDescriptor>,
    pub concepts: Vec<Finding>,
    pub algorithms: Vec<Finding>,
    pub language_features: Vec<Finding>,
    pub outcomes: Vec<String>,
    pub summary: String,
    /// Audio-safe narrative.
    pub document: NarrativeDocument,
}

impl CodeExplanation {
    /// Rendered audio-safe text.
    pub fn text(&self) -> String {
        audio_safe(&self.document.render())
    }

    /// All findings in pipeline order.
    pub fn findings(&self) -> Vec<Finding> {
        let mut findings = vec![Finding::new(
            FindingKind::ProgramType,
            "program_type",
            self.program_type.description.clone(),
        )];
        findings.extend(self.classes.iter().map(|c| {
            Finding::new(FindingKind::ClassDescriptor, "syntax", c.to_string())
        }));
        findings.extend(self.functions.iter().map(|f| {
            Finding::new(FindingKind::FunctionDescriptor, "syntax", f.to_string())
        }));
        findings.extend(self.concepts.iter().cloned());
        findings.extend(self.algorithms.iter().cloned());
        findings.extend(self.language_features.iter().cloned());
        findings
    }
}

/// Explain a code artifact.
pub fn explain(artifact: &SourceArtifact) -> CodeExplanation {
    explain_code(artifact.text(), artifact.extension())
}

/// Explain raw code given its file extension. Never fails.
pub fn explain_code(code: &str, extension: &str) -> CodeExplanation {
    let language = language_name(extension);
    let signals = CodeSignals::new(code);

    let program_type = detect_program_type(&signals, language);
    let scan = scan_syntax(code, extension);
    let concepts = detect_concepts(&signals, language);
    let algorithms = detect_algorithms(&signals);
    let language_features = detect_language_features(&signals, extension);
    let outcomes = synthesize_outcomes(&program_type, &concepts, &algorithms, language);
    let summary = summary_sentence(&program_type, language, scan.functions.len(), scan.classes.len());

    debug!(
        language,
        category = ?program_type.category,
        classes = scan.classes.len(),
        functions = scan.functions.len(),
        concepts = concepts.len(),
        algorithms = algorithms.len(),
        "explained code"
    );

    let mut doc = NarrativeDocument::new();
    doc.push(Section::new("🎯 WHAT THIS CODE DOES:", program_type.description.clone()));

    if !scan.classes.is_empty() {
        doc.push(Section::new(
            format!("🏗️ CLASSES & STRUCTURES ({} total):", scan.classes.len()),
            numbered(scan.classes.iter().take(MAX_LISTED_CLASSES)),
        ));
    }
    if !scan.functions.is_empty() {
        doc.push(Section::new(
            format!("🔧 FUNCTIONS & METHODS ({} total):", scan.functions.len()),
            numbered(scan.functions.iter().take(MAX_LISTED_FUNCTIONS)),
        ));
    }
    if !concepts.is_empty() {
        doc.push(Section::new("💡 KEY PROGRAMMING CONCEPTS:", marked("•", &concepts)));
    }
    if !algorithms.is_empty() {
        doc.push(Section::new("⚡ ALGORITHMS IMPLEMENTED:", marked("•", &algorithms)));
    }
    if !language_features.is_empty() {
        doc.push(Section::new(
            format!("🌟 {} SPECIFIC FEATURES:", language.to_uppercase()),
            marked("•", &language_features),
        ));
    }
    doc.push(Section::new(
        "🎓 WHAT YOU'LL LEARN:",
        outcomes
            .iter()
            .map(|o| format!("✓ {o}"))
            .collect::<Vec<_>>()
            .join("\n"),
    ));
    doc.push(Section::new("📚 SUMMARY:", summary.clone()).with_divider());

    CodeExplanation {
        language,
        program_type,
        classes: scan.classes,
        functions: scan.functions,
        concepts,
        algorithms,
        language_features,
        outcomes,
        summary,
        document: doc.audio_safe(),
    }
}

fn numbered<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn marked(mark: &str, findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|f| format!("{mark} {}", f.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORT_PY: &str = r#"
def bubble_sort(arr):
    n = len(arr)
    for i in range(n):
        for j in range(0, n - i - 1):
            if arr[j] > arr[j + 1]:
                arr[j], arr[j + 1] = arr[j + 1], arr[j]
    return arr

def binary_search(arr, target):
    low, high = 0, len(arr) - 1
    while low <= high:
        mid = (low + high) // 2
        if arr[mid] == target:
            return mid
        elif arr[mid] < target:
            low = mid + 1
        else:
            high = mid - 1
    return -1
"#;

    #[test]
    fn test_sections_in_order() {
        let explanation = explain_code(SORT_PY, ".py");
        let titles: Vec<_> = explanation
            .document
            .sections()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "TARGET: WHAT THIS CODE DOES:",
                "FUNCTIONS: FUNCTIONS & METHODS (2 total):",
                "CONCEPTS: KEY PROGRAMMING CONCEPTS:",
                "ALGORITHMS: ALGORITHMS IMPLEMENTED:",
                "LEARNING: WHAT YOU'LL LEARN:",
                "SUMMARY: SUMMARY:",
            ]
        );
    }

    #[test]
    fn test_text_is_audio_safe() {
        let text = explain_code(SORT_PY, ".py").text();
        for glyph in ["🎯", "🏗", "🔧", "💡", "⚡", "🌟", "🎓", "📚", "✓", "•"] {
            assert!(!text.contains(glyph), "found {glyph}");
        }
        assert!(!text.contains("=========="));
        assert!(text.contains("--- End of Analysis ---"));
        assert!(text.contains("1. bubble_sort(): Bubble Sort - repeatedly swaps adjacent elements"));
        assert!(text.contains("Point: Binary Search — O(log n)"));
    }

    #[test]
    fn test_function_listing_is_capped() {
        let code: String = (0..20).map(|i| format!("def step_{i}():\n    pass\n")).collect();
        let explanation = explain_code(&code, "py");
        assert_eq!(explanation.functions.len(), 20);
        let section = explanation
            .document
            .section("FUNCTIONS: FUNCTIONS & METHODS (20 total):")
            .unwrap();
        assert_eq!(section.body.lines().count(), MAX_LISTED_FUNCTIONS);
    }

    #[test]
    fn test_unknown_language_still_explained() {
        let explanation = explain_code("print 'hi'", ".xyz");
        assert_eq!(explanation.language, "Programming");
        assert!(explanation.classes.is_empty());
        assert!(!explanation.outcomes.is_empty());
    }

    #[test]
    fn test_findings_cover_all_detectors() {
        let explanation = explain_code(SORT_PY, "py");
        let findings = explanation.findings();
        assert_eq!(findings[0].kind, FindingKind::ProgramType);
        assert!(findings.iter().any(|f| f.kind == FindingKind::Algorithm));
        assert!(findings.iter().any(|f| f.kind == FindingKind::FunctionDescriptor));
    }
}
