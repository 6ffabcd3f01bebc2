//! Deliverables and development methodology.

use lazy_static::lazy_static;
use regex::Regex;

use crate::finding::{Finding, FindingKind};

const DETECTOR: &str = "deliverables";

static DELIVERABLE_TABLE: &[(&[&str], &str)] = &[
    (&["source code"], "complete source code"),
    (&["docker"], "containerized setup"),
    (&["api documentation", "api doc"], "API documentation"),
    (&["test suite", "testing"], "test suite"),
    (&["deployment"], "deployment configuration"),
    (&["documentation", "readme"], "comprehensive documentation"),
];

static AI_TOOLS: &[(&str, &str)] = &[
    ("cursor", "Cursor"),
    ("copilot", "GitHub Copilot"),
    ("codeium", "Codeium"),
    ("tabnine", "Tabnine"),
];

static EPICS: &[&str] = &[
    "project setup",
    "authentication",
    "user management",
    "deployment",
    "testing",
    "documentation",
];

lazy_static! {
    static ref AI_WORD: Regex = Regex::new(r"\bai\b").unwrap();
}

/// Deliverables mentioned in lower-cased `text`.
pub fn detect_deliverables(lower: &str) -> Vec<Finding> {
    DELIVERABLE_TABLE
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, label)| Finding::new(FindingKind::Deliverable, DETECTOR, *label))
        .collect()
}

pub fn deliverables_sentence(deliverables: &[Finding]) -> Option<String> {
    if deliverables.is_empty() {
        return None;
    }
    let labels: Vec<&str> = deliverables.iter().map(|d| d.text.as_str()).collect();
    Some(format!("Project deliverables include: {}.", labels.join(", ")))
}

/// AI-assisted development line; needs the word "ai" and a named tool.
pub fn ai_first_sentence(lower: &str) -> Option<String> {
    if !AI_WORD.is_match(lower) {
        return None;
    }
    let tools: Vec<&str> = AI_TOOLS
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .map(|(_, name)| *name)
        .collect();
    if tools.is_empty() {
        return None;
    }
    Some(format!(
        "The project follows an AI-first development approach using {} for enhanced productivity.",
        tools.join(", ")
    ))
}

/// Epic structure line; needs the word "epic" and at least one known epic.
pub fn epics_sentence(lower: &str) -> Option<String> {
    if !lower.contains("epic") {
        return None;
    }
    let found: Vec<&str> = EPICS.iter().copied().filter(|e| lower.contains(e)).collect();
    if found.is_empty() {
        return None;
    }
    Some(format!(
        "Development is structured into multiple epics including {}.",
        found.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::texts;

    #[test]
    fn test_deliverables_in_order() {
        let found = detect_deliverables("ship the readme, docker files and the source code");
        assert_eq!(
            texts(&found),
            vec!["complete source code", "containerized setup", "comprehensive documentation"]
        );
        assert_eq!(
            deliverables_sentence(&found).unwrap(),
            "Project deliverables include: complete source code, containerized setup, comprehensive documentation."
        );
    }

    #[test]
    fn test_ai_first_needs_word_and_tool() {
        assert!(ai_first_sentence("we maintain cursor positions").is_none());
        assert!(ai_first_sentence("use ai wisely").is_none());
        assert_eq!(
            ai_first_sentence("ai pair programming with cursor and copilot").unwrap(),
            "The project follows an AI-first development approach using Cursor, GitHub Copilot for enhanced productivity."
        );
    }

    #[test]
    fn test_epics() {
        assert!(epics_sentence("testing and deployment").is_none());
        assert_eq!(
            epics_sentence("epic 1: project setup. epic 2: testing").unwrap(),
            "Development is structured into multiple epics including project setup, testing."
        );
    }
}
