//! Named algorithm detection with static complexity notes.

use lazy_static::lazy_static;
use regex::Regex;

use super::CodeSignals;
use crate::finding::{Finding, FindingKind};

const DETECTOR: &str = "algorithms";

lazy_static! {
    /// Identifier prefixes like `dfs_helper` and camelCase pieces like `runDfs`,
    /// but not words that merely contain the letters (`pdfs`).
    static ref DFS: Regex = Regex::new(r"(?:^|[^a-z])dfs").unwrap();
    static ref DFS_CAMEL: Regex = Regex::new(r"D(?:fs|FS)").unwrap();
    static ref BFS: Regex = Regex::new(r"(?:^|[^a-z])bfs").unwrap();
    static ref BFS_CAMEL: Regex = Regex::new(r"B(?:fs|FS)").unwrap();
    static ref DP: Regex = Regex::new(r"\bdp\b").unwrap();
}

struct AlgorithmRule {
    name: &'static str,
    complexity: Option<&'static str>,
    note: &'static str,
    matches: fn(&CodeSignals) -> bool,
}

impl AlgorithmRule {
    fn label(&self) -> String {
        match self.complexity {
            Some(complexity) => format!("{} — {}, {}", self.name, complexity, self.note),
            None => format!("{} — {}", self.name, self.note),
        }
    }
}

const QUADRATIC: Option<&str> = Some("O(n²) time complexity");
const LINEARITHMIC: Option<&str> = Some("O(n log n) time complexity");
const GRAPH_TRAVERSAL: Option<&str> = Some("O(V + E) time complexity");

static RULES: &[AlgorithmRule] = &[
    AlgorithmRule {
        name: "Bubble Sort",
        complexity: QUADRATIC,
        note: "simple comparison-based sorting",
        matches: |s| s.has("bubblesort"),
    },
    AlgorithmRule {
        name: "Selection Sort",
        complexity: QUADRATIC,
        note: "finds minimum and swaps",
        matches: |s| s.has("selectionsort"),
    },
    AlgorithmRule {
        name: "Insertion Sort",
        complexity: QUADRATIC,
        note: "builds sorted array incrementally",
        matches: |s| s.has("insertionsort"),
    },
    AlgorithmRule {
        name: "Merge Sort",
        complexity: LINEARITHMIC,
        note: "divide and conquer approach",
        matches: |s| s.has("mergesort"),
    },
    AlgorithmRule {
        name: "Quick Sort",
        complexity: Some("O(n log n) average case"),
        note: "uses pivot partitioning",
        matches: |s| s.has("quicksort"),
    },
    AlgorithmRule {
        name: "Heap Sort",
        complexity: LINEARITHMIC,
        note: "uses heap data structure",
        matches: |s| s.has("heapsort"),
    },
    AlgorithmRule {
        name: "Binary Search",
        complexity: Some("O(log n) time complexity"),
        note: "works on sorted arrays",
        matches: |s| s.has("binarysearch"),
    },
    AlgorithmRule {
        name: "Linear Search",
        complexity: Some("O(n) time complexity"),
        note: "checks each element sequentially",
        matches: |s| s.has("linearsearch"),
    },
    AlgorithmRule {
        name: "Palindrome Check",
        complexity: None,
        note: "two-pointer technique to verify symmetry",
        matches: |s| s.has("palindrome"),
    },
    AlgorithmRule {
        name: "String Compression",
        complexity: None,
        note: "run-length encoding algorithm",
        matches: |s| s.has("compress") && s.has("string"),
    },
    AlgorithmRule {
        name: "Factorial Calculation",
        complexity: None,
        note: "iterative or recursive multiplication",
        matches: |s| s.has("factorial"),
    },
    AlgorithmRule {
        name: "Fibonacci Sequence",
        complexity: None,
        note: "dynamic programming or recursion",
        matches: |s| s.has("fibonacci"),
    },
    AlgorithmRule {
        name: "Prime Number Check",
        complexity: None,
        note: "divisibility testing algorithm",
        matches: |s| s.has("prime"),
    },
    AlgorithmRule {
        name: "Greatest Common Divisor",
        complexity: Some("O(log min(a, b)) time complexity"),
        note: "Euclidean algorithm",
        matches: |s| s.has("gcd"),
    },
    AlgorithmRule {
        name: "Depth-First Search",
        complexity: GRAPH_TRAVERSAL,
        note: "graph traversal using stack",
        matches: |s| DFS.is_match(&s.lower) || DFS_CAMEL.is_match(s.code) || s.has("depth"),
    },
    AlgorithmRule {
        name: "Breadth-First Search",
        complexity: GRAPH_TRAVERSAL,
        note: "graph traversal using queue",
        matches: |s| BFS.is_match(&s.lower) || BFS_CAMEL.is_match(s.code) || s.has("breadth"),
    },
    AlgorithmRule {
        name: "Dijkstra's Algorithm",
        complexity: Some("O((V + E) log V) time complexity"),
        note: "shortest path in weighted graphs",
        matches: |s| s.has("dijkstra"),
    },
    AlgorithmRule {
        name: "Dynamic Programming",
        complexity: None,
        note: "optimization using memoization",
        matches: |s| DP.is_match(&s.lower) || (s.has("dynamic") && s.has("programming")),
    },
    AlgorithmRule {
        name: "Shortest Path Calculation",
        complexity: None,
        note: "coordinate geometry using Pythagorean theorem",
        matches: |s| s.has("shortestpath"),
    },
];

/// Detect named algorithms. Every rule is checked; several may match.
pub fn detect_algorithms(signals: &CodeSignals) -> Vec<Finding> {
    RULES
        .iter()
        .filter(|rule| (rule.matches)(signals))
        .map(|rule| Finding::new(FindingKind::Algorithm, DETECTOR, rule.label()))
        .collect()
}
