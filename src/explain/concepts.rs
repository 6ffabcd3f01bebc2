//! Programming concept detection.

use lazy_static::lazy_static;
use regex::Regex;

use super::CodeSignals;
use crate::finding::{Finding, FindingKind};

const DETECTOR: &str = "concepts";

lazy_static! {
    static ref LOOP_KEYWORD: Regex = Regex::new(r"\b(for|while|do)\b").unwrap();
    static ref BRANCH_KEYWORD: Regex = Regex::new(r"\b(if|else|switch|case)\b").unwrap();
    static ref TRY_CATCH: Regex = Regex::new(r"\b(try|catch)\b").unwrap();
    static ref MEMORY_CALL: Regex = Regex::new(r"\b(malloc|free|new|delete)\b").unwrap();
}

struct ConceptRule {
    label: &'static str,
    matches: fn(&CodeSignals, &str) -> bool,
}

fn has_class(s: &CodeSignals) -> bool {
    s.has("class")
}

static RULES: &[ConceptRule] = &[
    ConceptRule {
        label: "Object-Oriented Programming - organizing code into classes and objects",
        matches: |s, _| has_class(s),
    },
    ConceptRule {
        label: "Inheritance - classes inheriting properties from parent classes",
        matches: |s, _| has_class(s) && s.has_any(&["extends", "inheritance"]),
    },
    ConceptRule {
        label: "Interfaces - contracts that classes must implement",
        matches: |s, _| has_class(s) && s.has("interface"),
    },
    ConceptRule {
        label: "Abstraction - hiding implementation details",
        matches: |s, _| has_class(s) && s.has("abstract"),
    },
    ConceptRule {
        label: "Arrays/Lists - storing multiple elements in ordered collection",
        matches: |s, _| s.has_any(&["array", "list", "arraylist"]),
    },
    ConceptRule {
        label: "Linked Lists - dynamic data structure with nodes and pointers",
        matches: |s, _| s.has_any(&["linkedlist", "node"]),
    },
    ConceptRule {
        label: "Queues - FIFO (First In, First Out) data structure",
        matches: |s, _| s.has("queue"),
    },
    ConceptRule {
        label: "Stacks - LIFO (Last In, First Out) data structure",
        matches: |s, _| s.has("stack"),
    },
    ConceptRule {
        label: "Trees - hierarchical data structure with parent-child relationships",
        matches: |s, _| s.has("tree"),
    },
    ConceptRule {
        label: "Graphs - network structure with nodes and edges",
        matches: |s, _| s.has("graph"),
    },
    ConceptRule {
        label: "Hash Tables - fast key-value lookup using hash functions",
        matches: |s, _| s.has("hash"),
    },
    ConceptRule {
        label: "Sorting Algorithms - arranging data in specific order",
        matches: |s, _| s.has("sort"),
    },
    ConceptRule {
        label: "Search Algorithms - finding specific elements efficiently",
        matches: |s, _| s.has("search"),
    },
    ConceptRule {
        label: "Recursion - functions calling themselves to solve problems",
        matches: |s, _| s.has_any(&["recursion", "recursive"]),
    },
    ConceptRule {
        label: "Dynamic Programming - optimizing recursive solutions",
        matches: |s, _| s.has("dynamic") && s.has("programming"),
    },
    ConceptRule {
        label: "Loops - repeating code blocks for iteration",
        matches: |s, _| LOOP_KEYWORD.is_match(&s.lower),
    },
    ConceptRule {
        label: "Conditional Statements - making decisions in code",
        matches: |s, _| BRANCH_KEYWORD.is_match(&s.lower),
    },
    ConceptRule {
        label: "Exception Handling - managing errors gracefully",
        matches: |s, _| s.has("exception") || TRY_CATCH.is_match(&s.lower),
    },
    ConceptRule {
        label: "Memory Management - allocating and deallocating memory",
        matches: |s, lang| matches!(lang, "C" | "C++") && MEMORY_CALL.is_match(&s.lower),
    },
    ConceptRule {
        label: "Pointers - variables storing memory addresses",
        matches: |s, _| s.has("pointer") || s.code.contains("->"),
    },
    ConceptRule {
        label: "String Manipulation - processing and modifying text data",
        matches: |s, _| s.has_any(&["substring", "split", "join", "replace"]),
    },
    ConceptRule {
        label: "Input/Output Operations - reading user input and displaying output",
        matches: |s, _| s.has_any(&["scanner", "input", "cin", "cout", "printf", "scanf"]),
    },
];

/// Detect programming concepts. Independent of every other detector.
pub fn detect_concepts(signals: &CodeSignals, language: &str) -> Vec<Finding> {
    RULES
        .iter()
        .filter(|rule| (rule.matches)(signals, language))
        .map(|rule| Finding::new(FindingKind::Concept, DETECTOR, rule.label))
        .collect()
}
