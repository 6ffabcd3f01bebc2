//! Language-specific feature detection, keyed by file extension.

use lazy_static::lazy_static;
use regex::Regex;

use super::CodeSignals;
use crate::finding::{Finding, FindingKind};

const DETECTOR: &str = "language_features";

lazy_static! {
    static ref LIST_COMPREHENSION: Regex =
        Regex::new(r"\[[^\]]*\bfor\b[^\]]*\bin\b[^\]]*\]").unwrap();
    static ref WITH_BLOCK: Regex = Regex::new(r"\bwith\b").unwrap();
    static ref DECORATOR: Regex = Regex::new(r"(?m)^\s*@\w+").unwrap();
}

struct FeatureRule {
    label: &'static str,
    matches: fn(&CodeSignals) -> bool,
}

const fn rule(label: &'static str, matches: fn(&CodeSignals) -> bool) -> FeatureRule {
    FeatureRule { label, matches }
}

static JAVA: &[FeatureRule] = &[
    rule("Scanner class for user input handling", |s| s.has("scanner")),
    rule("StringBuilder for efficient string manipulation", |s| s.has("stringbuilder")),
    rule("ArrayList for dynamic array operations", |s| s.has("arraylist")),
    rule("HashMap for key-value pair storage", |s| s.has("hashmap")),
    rule("Interfaces for contract-based programming", |s| s.has("interface")),
    rule("Class inheritance using extends keyword", |s| s.has("extends")),
    rule("Interface implementation", |s| s.has("implements")),
    rule("Static methods and variables", |s| s.has("static")),
    rule("Final keyword for immutability", |s| s.has("final")),
];

static PYTHON: &[FeatureRule] = &[
    rule("List comprehensions for concise data processing", |s| {
        s.has("list comprehension") || LIST_COMPREHENSION.is_match(s.code)
    }),
    rule("Lambda functions for inline function definitions", |s| s.has("lambda")),
    rule("Context managers for resource management", |s| WITH_BLOCK.is_match(&s.lower)),
    rule("Generators using yield for memory-efficient iteration", |s| s.has("yield")),
    rule("Decorators for function modification", |s| {
        s.has("decorator") || DECORATOR.is_match(s.code)
    }),
    rule("Constructor methods for object initialization", |s| s.lower.contains("__init__")),
    rule("Self parameter for instance method access", |s| s.has("self")),
];

static JAVASCRIPT: &[FeatureRule] = &[
    rule("Arrow functions for concise function syntax", |s| {
        s.has("arrow function") || s.code.contains("=>")
    }),
    rule("Async/await for asynchronous programming", |s| s.has("async") && s.has("await")),
    rule("Promises for handling asynchronous operations", |s| s.has("promise")),
    rule("Callback functions for event handling", |s| s.has("callback")),
    rule("Closures for data encapsulation", |s| s.has("closure")),
    rule("Prototype-based inheritance", |s| s.has("prototype")),
];

static CPP: &[FeatureRule] = &[
    rule("Templates for generic programming", |s| s.has("template")),
    rule("Namespaces for code organization", |s| s.has("namespace")),
    rule("Operator overloading for custom operations", |s| s.has("operator")),
    rule("Virtual functions for polymorphism", |s| s.has("virtual")),
    rule("Smart pointers for automatic memory management", |s| {
        s.has_any(&["smart pointer", "unique_ptr", "shared_ptr"])
    }),
    rule("STL vectors for dynamic arrays", |s| s.has("vector")),
];

static C: &[FeatureRule] = &[
    rule("Dynamic memory allocation", |s| s.has_any(&["malloc", "calloc"])),
    rule("Structures for custom data types", |s| s.has("struct")),
    rule("Pointers for memory address manipulation", |s| {
        s.has("pointer") || s.code.contains("->")
    }),
    rule("Type definitions for code clarity", |s| s.has("typedef")),
];

fn rules_for(extension: &str) -> &'static [FeatureRule] {
    match extension {
        "java" => JAVA,
        "py" => PYTHON,
        "js" => JAVASCRIPT,
        "cpp" => CPP,
        "c" => C,
        _ => &[],
    }
}

/// Detect idioms specific to the language of `extension`.
pub fn detect_language_features(signals: &CodeSignals, extension: &str) -> Vec<Finding> {
    let ext = crate::source::normalize_extension(extension);
    rules_for(&ext)
        .iter()
        .filter(|rule| (rule.matches)(signals))
        .map(|rule| Finding::new(FindingKind::LanguageFeature, DETECTOR, rule.label))
        .collect()
}
