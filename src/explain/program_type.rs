//! Program type classification.
//!
//! Categories are tried in a fixed priority order and the first match wins,
//! so every input gets exactly one category.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::CodeSignals;

lazy_static! {
    static ref LOOP_COUNT: Regex = Regex::new(r"for.*?(\d+)").unwrap();
    static ref CLASS_DECL: Regex = Regex::new(r"(?i)class\s+\w+").unwrap();
}

/// Mutually exclusive program categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCategory {
    HelloWorldLoop,
    HelloWorld,
    StringManipulation,
    Factorial,
    Fibonacci,
    Prime,
    EvenOdd,
    DataStructures,
    Algorithms,
    WebDevelopment,
    Database,
    ObjectOriented,
    MultiClass,
    General,
}

/// The single category assigned to a program plus its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramType {
    pub category: ProgramCategory,
    pub description: String,
}

/// One step of the cascade.
struct CategoryRule {
    category: ProgramCategory,
    matches: fn(&CodeSignals) -> bool,
    describe: fn(&CodeSignals, &str) -> String,
}

static RULES: &[CategoryRule] = &[
    CategoryRule {
        category: ProgramCategory::HelloWorldLoop,
        matches: is_greeting_loop,
        describe: describe_greeting_loop,
    },
    CategoryRule {
        category: ProgramCategory::HelloWorld,
        matches: is_greeting,
        describe: describe_greeting,
    },
    CategoryRule {
        category: ProgramCategory::StringManipulation,
        matches: is_string_program,
        describe: describe_string_program,
    },
    CategoryRule {
        category: ProgramCategory::Factorial,
        matches: |s| s.has("factorial"),
        describe: |_, lang| {
            format!("This {lang} program calculates factorial (n! = n × (n-1) × ... × 1).")
        },
    },
    CategoryRule {
        category: ProgramCategory::Fibonacci,
        matches: |s| s.has("fibonacci"),
        describe: |_, lang| {
            format!(
                "This {lang} program generates Fibonacci sequence (each number = sum of previous two)."
            )
        },
    },
    CategoryRule {
        category: ProgramCategory::Prime,
        matches: |s| s.has("prime"),
        describe: |_, lang| {
            format!(
                "This {lang} program checks if numbers are prime (only divisible by 1 and themselves)."
            )
        },
    },
    CategoryRule {
        category: ProgramCategory::EvenOdd,
        matches: |s| s.has_any(&["even", "odd"]),
        describe: |_, lang| {
            format!("This {lang} program determines if numbers are even or odd using modulo operator.")
        },
    },
    CategoryRule {
        category: ProgramCategory::DataStructures,
        matches: |s| s.has_any(&["linkedlist", "queue", "stack", "tree", "graph", "heap"]),
        describe: describe_data_structures,
    },
    CategoryRule {
        category: ProgramCategory::Algorithms,
        matches: |s| s.has_any(&["sort", "search", "merge", "quick", "bubble"]),
        describe: describe_algorithms,
    },
    CategoryRule {
        category: ProgramCategory::WebDevelopment,
        matches: |s| s.has_any(&["html", "css", "dom", "fetch", "api", "ajax"]),
        describe: |_, lang| {
            format!(
                "This {lang} program is for web development, handling DOM manipulation, API calls, or frontend functionality."
            )
        },
    },
    CategoryRule {
        category: ProgramCategory::Database,
        matches: |s| s.has_any(&["sql", "database", "query", "select", "insert", "update"]),
        describe: |_, lang| {
            format!(
                "This {lang} program handles database operations including queries, data manipulation, and storage."
            )
        },
    },
    CategoryRule {
        category: ProgramCategory::ObjectOriented,
        matches: |s| {
            s.has("class")
                && s.has_any(&["extends", "inheritance", "polymorphism", "encapsulation"])
        },
        describe: |_, lang| {
            format!(
                "This {lang} program demonstrates Object-Oriented Programming concepts with classes, inheritance, and encapsulation."
            )
        },
    },
    CategoryRule {
        category: ProgramCategory::MultiClass,
        matches: |s| s.code.contains("class"),
        describe: |s, lang| {
            let count = CLASS_DECL.find_iter(s.code).count();
            format!("This {lang} program contains {count} classes implementing various computational operations.")
        },
    },
];

/// Classify a program. Never fails; absent signals give the general category.
pub fn detect_program_type(signals: &CodeSignals, language: &str) -> ProgramType {
    for rule in RULES {
        if (rule.matches)(signals) {
            return ProgramType {
                category: rule.category,
                description: (rule.describe)(signals, language),
            };
        }
    }

    ProgramType {
        category: ProgramCategory::General,
        description: format!(
            "This {language} program performs computational operations and demonstrates programming fundamentals."
        ),
    }
}

fn is_greeting(s: &CodeSignals) -> bool {
    s.has("hello") && s.has("world")
}

fn is_greeting_loop(s: &CodeSignals) -> bool {
    is_greeting(s) && LOOP_COUNT.is_match(s.code)
}

fn describe_greeting_loop(s: &CodeSignals, lang: &str) -> String {
    let times = LOOP_COUNT
        .captures(s.code)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or("several");
    format!("This is a {lang} program that prints 'Hello World' {times} times using a loop.")
}

fn describe_greeting(_: &CodeSignals, lang: &str) -> String {
    format!(
        "This is a simple {lang} 'Hello World' program - the traditional first program for beginners."
    )
}

fn is_string_program(s: &CodeSignals) -> bool {
    s.has_any(&["palindrome", "paligdron", "substring", "compress", "uppercase"])
}

fn describe_string_program(s: &CodeSignals, lang: &str) -> String {
    let mut operations = Vec::new();
    if s.has_any(&["palindrome", "paligdron"]) {
        operations.push("palindrome checking (reads same forwards/backwards)");
    }
    if s.has("substring") {
        operations.push("substring extraction");
    }
    if s.has("compress") {
        operations.push("string compression (run-length encoding)");
    }
    if s.has_any(&["uppercase", "titlecase"]) {
        operations.push("text case conversion");
    }
    if s.has("shortestpath") {
        operations.push("shortest path calculation using coordinates");
    }
    format!(
        "This is a comprehensive {lang} string manipulation program that demonstrates: {}.",
        operations.join(", ")
    )
}

fn describe_data_structures(s: &CodeSignals, lang: &str) -> String {
    let mut structures = Vec::new();
    if s.has_any(&["linkedlist", "node"]) {
        structures.push("Linked Lists");
    }
    if s.has("queue") {
        structures.push("Queues (FIFO)");
    }
    if s.has("stack") {
        structures.push("Stacks (LIFO)");
    }
    if s.has("tree") {
        structures.push("Trees");
    }
    if s.has("graph") {
        structures.push("Graphs");
    }
    if s.has("heap") {
        structures.push("Heaps");
    }
    format!(
        "This {lang} program implements and demonstrates {} data structures.",
        structures.join(", ")
    )
}

fn describe_algorithms(s: &CodeSignals, lang: &str) -> String {
    let mut algorithms = Vec::new();
    if s.has("sort") {
        algorithms.push(if s.has("bubble") {
            "Bubble Sort"
        } else if s.has("merge") {
            "Merge Sort"
        } else if s.has("quick") {
            "Quick Sort"
        } else {
            "Sorting algorithms"
        });
    }
    if s.has("search") {
        algorithms.push(if s.has("binary") {
            "Binary Search"
        } else if s.has("linear") {
            "Linear Search"
        } else {
            "Search algorithms"
        });
    }
    if algorithms.is_empty() {
        // merge/quick/bubble named without sort or search
        algorithms.push("algorithmic routines");
    }
    format!(
        "This {lang} program implements {} for efficient data processing.",
        algorithms.join(", ")
    )
}
