//! Code explanation pipeline.
//!
//! Stages run strictly in order and each reads only the raw code:
//! program type, syntax scan, concepts, algorithms, language features,
//! learning outcomes, then narrative assembly.

mod algorithms;
mod concepts;
mod language_features;
mod outcomes;
mod program_type;
mod purpose;
mod runner;
mod syntax;

pub use algorithms::detect_algorithms;
pub use concepts::detect_concepts;
pub use language_features::detect_language_features;
pub use outcomes::{summary_sentence, synthesize_outcomes};
pub use program_type::{detect_program_type, ProgramCategory, ProgramType};
pub use purpose::{class_purpose, function_purpose};
pub use runner::{explain, explain_code, CodeExplanation, MAX_LISTED_CLASSES, MAX_LISTED_FUNCTIONS};
pub use syntax::{scan_syntax, supported_extensions, ClassDescriptor, FunctionDescriptor, SyntaxScan};

/// Pre-computed views of a code body shared by all detectors.
pub struct CodeSignals<'a> {
    /// The code exactly as given (for case-sensitive checks).
    pub code: &'a str,
    /// Lower-cased code.
    pub lower: String,
    /// Lower-cased code with underscores removed, so `bubble_sort` reads as `bubblesort`.
    compact: String,
}

impl<'a> CodeSignals<'a> {
    pub fn new(code: &'a str) -> Self {
        let lower = code.to_lowercase();
        let compact = lower.replace('_', "");
        Self {
            code,
            lower,
            compact,
        }
    }

    /// Whether a lower-case keyword occurs, ignoring underscores.
    pub fn has(&self, keyword: &str) -> bool {
        self.lower.contains(keyword) || self.compact.contains(keyword)
    }

    pub fn has_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.has(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signals_ignore_underscores() {
        let signals = CodeSignals::new("def Bubble_Sort(arr):");
        assert!(signals.has("bubblesort"));
        assert!(signals.has("bubble_sort"));
        assert!(!signals.has("quicksort"));
        assert!(signals.has_any(&["quick", "bubble"]));
    }
}
