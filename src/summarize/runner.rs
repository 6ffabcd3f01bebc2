//! Runs the summarization stages and assembles the summary.

use serde::Serialize;
use tracing::debug;

use super::balance::LengthBalancer;
use super::deliverables::{ai_first_sentence, deliverables_sentence, detect_deliverables, epics_sentence};
use super::features::{detect_features, features_sentence};
use super::normalize::{char_len, char_prefix, normalize_text, SentencePool, MIN_SUMMARY_INPUT};
use super::tech_stack::{detect_tech_stack, TechStack};
use super::topic::{extract_topic, Topic};
use crate::finding::Finding;
use crate::narrative::{NarrativeDocument, Section};
use crate::source::SourceArtifact;

/// Returned verbatim, truncated, when no sentence is long enough to summarize.
const FALLBACK_CHARS: usize = 1000;

const OVERVIEW_SCAN: usize = 15;
const OVERVIEW_SENTENCES: usize = 5;

const APPROACH_KEYWORDS: &[&str] = &[
    "component",
    "module",
    "structure",
    "architecture",
    "implementation",
    "design",
    "workflow",
    "process",
    "method",
    "approach",
    "technique",
];

/// A document summary with the signals it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub topic: Option<Topic>,
    pub tech_stack: TechStack,
    pub features: Vec<Finding>,
    pub deliverables: Vec<Finding>,
    /// Target length chosen by the balancer; absent for pass-through inputs.
    pub target_length: Option<usize>,
    pub document: NarrativeDocument,
    pub text: String,
}

impl DocumentSummary {
    fn passthrough(text: String) -> Self {
        let mut document = NarrativeDocument::new();
        document.push(Section::new("", text.clone()));
        Self {
            topic: None,
            tech_stack: TechStack::default(),
            features: Vec::new(),
            deliverables: Vec::new(),
            target_length: None,
            document,
            text,
        }
    }

    /// All findings in pipeline order.
    pub fn findings(&self) -> Vec<Finding> {
        let mut findings = self.tech_stack.findings();
        findings.extend(self.features.iter().cloned());
        findings.extend(self.deliverables.iter().cloned());
        findings
    }
}

/// Summarize a document artifact.
pub fn summarize(artifact: &SourceArtifact) -> DocumentSummary {
    summarize_text(artifact.text())
}

/// Summarize prose. Never fails.
pub fn summarize_text(raw: &str) -> DocumentSummary {
    if char_len(raw) < MIN_SUMMARY_INPUT {
        return DocumentSummary::passthrough(raw.to_string());
    }

    let text = normalize_text(raw);
    let lower = text.to_lowercase();
    let mut pool = SentencePool::from_text(&text);
    if pool.is_empty() {
        debug!(chars = char_len(&text), "no meaningful sentences, returning prefix");
        return DocumentSummary::passthrough(char_prefix(&text, FALLBACK_CHARS).to_string());
    }

    let topic = extract_topic(&pool);
    let tech_stack = detect_tech_stack(&lower);
    let features = detect_features(&lower);
    let deliverables = detect_deliverables(&lower);

    let mut doc = NarrativeDocument::new();
    doc.push(Section::new("Topic", topic.sentence.clone()));

    let overview: Vec<usize> = pool
        .iter()
        .take(OVERVIEW_SCAN)
        .filter(|(_, s)| {
            let lower = s.to_lowercase();
            char_len(s) > 20 && !lower.contains("slide") && !lower.contains("page")
        })
        .map(|(i, _)| i)
        .take(OVERVIEW_SENTENCES)
        .collect();
    if !overview.is_empty() {
        doc.push(Section::new("Overview", pool.take(&overview).join(" ")));
    }

    push_optional(&mut doc, "Technology stack", tech_stack.sentence());
    push_optional(&mut doc, "Key features", features_sentence(&features));
    push_optional(&mut doc, "Development approach", ai_first_sentence(&lower));
    push_optional(&mut doc, "Epics", epics_sentence(&lower));
    push_optional(&mut doc, "Deliverables", deliverables_sentence(&deliverables));

    let approach: Vec<usize> = pool
        .iter()
        .filter(|(i, s)| {
            let lower = s.to_lowercase();
            !pool.is_used(*i)
                && char_len(s) > 20
                && APPROACH_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(|(i, _)| i)
        .take(2)
        .collect();
    if !approach.is_empty() {
        let body = format!("Implementation approach: {}", pool.take(&approach).join(" "));
        doc.push(Section::new("Implementation approach", body));
    }

    if pool.len() > 10 {
        let context: Vec<usize> = pool
            .unused_in(10, pool.len())
            .filter(|(_, s)| char_len(s) > 25)
            .map(|(i, _)| i)
            .take(2)
            .collect();
        if !context.is_empty() {
            let body = format!("Additional context: {}", pool.take(&context).join(" "));
            doc.push(Section::new("Additional context", body));
        }
    }

    let balancer = LengthBalancer::for_input_len(char_len(&text));
    let summary = balancer.balance(&mut doc, &mut pool);

    debug!(
        input_chars = char_len(&text),
        target = balancer.target(),
        summary_chars = char_len(&summary),
        sentences = pool.len(),
        "summarized document"
    );

    DocumentSummary {
        topic: Some(topic),
        tech_stack,
        features,
        deliverables,
        target_length: Some(balancer.target()),
        document: doc,
        text: summary,
    }
}

fn push_optional(doc: &mut NarrativeDocument, title: &str, body: Option<String>) {
    if let Some(body) = body {
        doc.push(Section::new(title, body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT_BRIEF: &str = "The Campus Event Portal is a web application for students. \
        The frontend uses React with a clean layout. \
        Data is stored in MongoDB collections. \
        Users sign in through authentication backed by tokens. \
        Organisers publish events and students register for them.";

    #[test]
    fn test_short_input_passthrough() {
        let summary = summarize_text("tiny note");
        assert_eq!(summary.text, "tiny note");
        assert!(summary.target_length.is_none());
    }

    #[test]
    fn test_no_meaningful_sentences_returns_prefix() {
        let raw = "word. ".repeat(30);
        let summary = summarize_text(&raw);
        assert!(summary.text.starts_with("word. word."));
        assert!(summary.topic.is_none());
    }

    #[test]
    fn test_brief_summary() {
        let summary = summarize_text(PROJECT_BRIEF);
        assert_eq!(summary.target_length, Some(400));
        assert!(summary.text.starts_with("This document describes the Campus Event Portal project."));
        assert!(summary.text.contains("Frontend: React"));
        assert!(summary.text.contains("Database: MongoDB"));
        assert!(summary.text.contains("Authentication & Authorization"));
        assert!(char_len(&summary.text) <= 480);
    }

    #[test]
    fn test_sections_follow_pipeline_order() {
        let summary = summarize_text(PROJECT_BRIEF);
        let titles: Vec<_> = summary
            .document
            .sections()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(&titles[..2], &["Topic", "Overview"]);
        let topic = titles.iter().position(|t| *t == "Topic").unwrap();
        let stack = titles.iter().position(|t| *t == "Technology stack").unwrap();
        let features = titles.iter().position(|t| *t == "Key features").unwrap();
        assert!(topic < stack && stack < features);
    }

    #[test]
    fn test_findings_collected() {
        let summary = summarize_text(PROJECT_BRIEF);
        let findings = summary.findings();
        assert!(findings.iter().any(|f| f.text == "Frontend: React"));
        assert!(findings.iter().any(|f| f.text == "Authentication & Authorization"));
    }
}
