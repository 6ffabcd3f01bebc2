//! Topic sentence extraction.

use serde::Serialize;

use super::normalize::SentencePool;

/// Vocabulary that marks a sentence as describing the project itself.
const PROJECT_INDICATORS: &[&str] = &[
    "project",
    "system",
    "application",
    "platform",
    "website",
    "portal",
    "tool",
    "software",
];

const NAME_STOP_WORDS: &[&str] = &["the", "and", "for", "with", "using"];

/// Only the first sentences are searched for the project description.
const TOPIC_SCAN_LIMIT: usize = 20;
const MAX_NAME_TOKENS: usize = 6;

/// The opening sentence of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Project name, when one was recognised.
    pub name: Option<String>,
    pub sentence: String,
}

/// Derive the topic sentence. Always produces one.
pub fn extract_topic(pool: &SentencePool) -> Topic {
    let project_sentence = pool
        .iter()
        .take(TOPIC_SCAN_LIMIT)
        .map(|(_, s)| s)
        .find(|s| {
            let lower = s.to_lowercase();
            PROJECT_INDICATORS.iter().any(|i| lower.contains(i))
        });

    let Some(sentence) = project_sentence else {
        return Topic {
            name: None,
            sentence: "This document contains technical project information.".to_string(),
        };
    };

    let name_tokens = leading_capitalized_run(sentence);
    if name_tokens.len() >= 2 {
        let name = name_tokens.join(" ");
        Topic {
            sentence: format!("This document describes the {name} project."),
            name: Some(name),
        }
    } else {
        Topic {
            name: None,
            sentence: "This document outlines a software development project.".to_string(),
        }
    }
}

/// First run of capitalized tokens longer than two characters.
fn leading_capitalized_run(sentence: &str) -> Vec<&str> {
    let mut run = Vec::new();
    for word in sentence.split_whitespace() {
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        let eligible = capitalized
            && word.chars().count() > 2
            && !NAME_STOP_WORDS.contains(&word.to_lowercase().as_str());
        if eligible {
            run.push(word);
            if run.len() >= MAX_NAME_TOKENS {
                break;
            }
        } else if !run.is_empty() {
            break;
        }
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(text: &str) -> Topic {
        extract_topic(&SentencePool::from_text(text))
    }

    #[test]
    fn test_named_project() {
        let t = topic("We will build the Enquiry Management System for a client. It has pages.");
        assert_eq!(t.name.as_deref(), Some("Enquiry Management System"));
        assert_eq!(t.sentence, "This document describes the Enquiry Management System project.");
    }

    #[test]
    fn test_name_capped_at_six_tokens() {
        let t = topic("Alpha Beta Gamma Delta Epsilon Zeta Theta platform overview here.");
        assert_eq!(t.name.as_deref(), Some("Alpha Beta Gamma Delta Epsilon Zeta"));
    }

    #[test]
    fn test_single_capitalized_token_is_generic() {
        let t = topic("This platform lets people share files.");
        assert_eq!(t.sentence, "This document outlines a software development project.");
    }

    #[test]
    fn test_no_project_vocabulary() {
        let t = topic("The weather was pleasant all week long.");
        assert_eq!(t.sentence, "This document contains technical project information.");
        assert!(t.name.is_none());
    }
}
