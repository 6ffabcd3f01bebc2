//! Lightweight, per-language syntax scanning.
//!
//! This is pattern matching over raw text, not parsing. Each language has a
//! list of class and function patterns; names are collected in order of
//! discovery, de-duplicated, and described by [`class_purpose`] and
//! [`function_purpose`].

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::purpose::{class_purpose, function_purpose};

/// Identifiers the patterns pick up that are never user-defined names.
const NOISE_IDENTIFIERS: &[&str] = &[
    "main", "args", "string", "void", "int", "public", "private", "class", "if", "for", "while",
    "switch", "catch", "return", "else", "new", "sizeof", "constructor", "function",
];

struct FunctionPattern {
    regex: Regex,
    /// Capture group that holds the function name.
    name_group: usize,
}

struct LanguagePatterns {
    classes: Vec<Regex>,
    functions: Vec<FunctionPattern>,
}

fn pattern(source: &str) -> Regex {
    Regex::new(&format!("(?im){source}")).unwrap()
}

fn function(source: &str, name_group: usize) -> FunctionPattern {
    FunctionPattern {
        regex: pattern(source),
        name_group,
    }
}

lazy_static! {
    static ref PATTERNS: HashMap<&'static str, LanguagePatterns> = {
        let mut m = HashMap::new();
        m.insert("java", LanguagePatterns {
            classes: vec![pattern(
                r"(?:public\s+|private\s+|protected\s+)?class\s+(\w+)(?:\s+extends\s+\w+)?(?:\s+implements\s+[\w,\s]+)?\s*\{",
            )],
            functions: vec![
                function(
                    r"(?:public\s+|private\s+|protected\s+)?(?:static\s+)?(?:final\s+)?(\w+)\s+(\w+)\s*\([^)]*\)\s*(?:throws\s+[\w,\s]+)?\s*\{",
                    2,
                ),
                function(
                    r"(?:public\s+|private\s+|protected\s+)?(?:static\s+)?(void)\s+(\w+)\s*\([^)]*\)\s*\{",
                    2,
                ),
            ],
        });
        m.insert("py", LanguagePatterns {
            classes: vec![pattern(r"class\s+(\w+)(?:\([^)]*\))?\s*:")],
            functions: vec![function(r"def\s+(\w+)\s*\([^)]*\)\s*(?:->\s*[\w\[\],\s]+)?\s*:", 1)],
        });
        m.insert("cpp", LanguagePatterns {
            classes: vec![
                pattern(r"class\s+(\w+)(?:\s*:\s*(?:public|private|protected)\s+\w+)?\s*\{"),
                pattern(r"struct\s+(\w+)\s*\{"),
            ],
            functions: vec![function(
                r"(?:inline\s+)?(?:virtual\s+)?(?:static\s+)?(\w+(?:\s*\*)?)\s+(\w+)\s*\([^)]*\)\s*(?:const\s*)?\{",
                2,
            )],
        });
        m.insert("c", LanguagePatterns {
            classes: vec![
                pattern(r"struct\s+(\w+)\s*\{"),
                pattern(r"typedef\s+struct\s*\{[^}]*\}\s*(\w+)"),
            ],
            functions: vec![function(r"(\w+(?:\s*\*)?)\s+(\w+)\s*\([^)]*\)\s*\{", 2)],
        });
        m.insert("cs", LanguagePatterns {
            classes: vec![pattern(
                r"(?:public\s+|private\s+|internal\s+)?(?:abstract\s+|sealed\s+)?class\s+(\w+)(?:\s*:\s*\w+)?\s*\{",
            )],
            functions: vec![function(
                r"(?:public\s+|private\s+|protected\s+|internal\s+)?(?:static\s+)?(?:virtual\s+|override\s+)?(\w+)\s+(\w+)\s*\([^)]*\)\s*\{",
                2,
            )],
        });
        m.insert("js", LanguagePatterns {
            classes: vec![pattern(r"class\s+(\w+)(?:\s+extends\s+\w+)?\s*\{")],
            functions: vec![
                function(r"function\s+(\w+)\s*\([^)]*\)\s*\{", 1),
                function(r"(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?\([^)]*\)\s*=>\s*\{?", 1),
                function(r"(\w+)\s*:\s*(?:async\s+)?function\s*\([^)]*\)\s*\{", 1),
                // class methods
                function(r"^[ \t]+(?:async\s+)?(\w+)\s*\([^)]*\)\s*\{", 1),
            ],
        });
        m.insert("ts", LanguagePatterns {
            classes: vec![pattern(
                r"(?:export\s+)?(?:abstract\s+)?class\s+(\w+)(?:<[^>]*>)?(?:\s+extends\s+\w+)?(?:\s+implements\s+[\w,\s]+)?\s*\{",
            )],
            functions: vec![
                function(
                    r"(?:export\s+)?(?:async\s+)?function\s+(\w+)(?:<[^>]*>)?\s*\([^)]*\)\s*(?::\s*[\w\[\]<>,\s|]+)?\s*\{",
                    1,
                ),
                function(r"^[ \t]+(?:public\s+|private\s+|protected\s+)?(?:async\s+)?(\w+)\s*\([^)]*\)\s*(?::\s*[\w\[\]<>,\s|]+)?\s*\{", 1),
            ],
        });
        m
    };
}

/// Extensions with scanning patterns.
pub fn supported_extensions() -> Vec<&'static str> {
    let mut exts: Vec<_> = PATTERNS.keys().copied().collect();
    exts.sort_unstable();
    exts
}

/// A class or struct found in the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDescriptor {
    pub name: String,
    pub purpose: String,
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} class: {}", self.name, self.purpose)
    }
}

/// A function or method found in the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub purpose: String,
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(): {}", self.name, self.purpose)
    }
}

/// Everything the scanner found, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyntaxScan {
    pub classes: Vec<ClassDescriptor>,
    pub functions: Vec<FunctionDescriptor>,
}

impl SyntaxScan {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty()
    }
}

fn is_noise(name: &str) -> bool {
    NOISE_IDENTIFIERS.contains(&name.to_lowercase().as_str())
}

/// Scan code for class and function declarations.
///
/// Extensions without patterns yield an empty scan.
pub fn scan_syntax(code: &str, extension: &str) -> SyntaxScan {
    let ext = crate::source::normalize_extension(extension);
    let Some(patterns) = PATTERNS.get(ext.as_str()) else {
        return SyntaxScan::default();
    };

    let mut scan = SyntaxScan::default();

    let mut seen = HashSet::new();
    for regex in &patterns.classes {
        for caps in regex.captures_iter(code) {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if seen.insert(name.to_string()) {
                scan.classes.push(ClassDescriptor {
                    name: name.to_string(),
                    purpose: class_purpose(name),
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for pattern in &patterns.functions {
        for caps in pattern.regex.captures_iter(code) {
            let Some(name) = caps.get(pattern.name_group).map(|m| m.as_str()) else {
                continue;
            };
            if is_noise(name) {
                continue;
            }
            if seen.insert(name.to_string()) {
                scan.functions.push(FunctionDescriptor {
                    name: name.to_string(),
                    purpose: function_purpose(name),
                });
            }
        }
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function_names(scan: &SyntaxScan) -> Vec<&str> {
        scan.functions.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_python_scan() {
        let code = "class Sorter:\n    def bubble_sort(self, arr):\n        pass\n\ndef binary_search(arr, target) -> int:\n    return -1\n";
        let scan = scan_syntax(code, ".py");
        assert_eq!(scan.classes.len(), 1);
        assert_eq!(scan.classes[0].name, "Sorter");
        assert_eq!(function_names(&scan), vec!["bubble_sort", "binary_search"]);
        assert!(scan.functions[0].purpose.starts_with("Bubble Sort"));
    }

    #[test]
    fn test_java_scan_filters_noise() {
        let code = r#"
public class StringUtils {
    public static void main(String[] args) {
        System.out.println(isPalindrome("abba"));
    }
    public static boolean isPalindrome(String s) {
        if (s.isEmpty()) {
            return true;
        }
        return false;
    }
}
"#;
        let scan = scan_syntax(code, "java");
        assert_eq!(scan.classes[0].name, "StringUtils");
        assert_eq!(function_names(&scan), vec!["isPalindrome"]);
    }

    #[test]
    fn test_duplicates_collapsed() {
        let code = "void push(int x) {\n}\nvoid push(char c) {\n}\n";
        let scan = scan_syntax(code, "cpp");
        assert_eq!(function_names(&scan), vec!["push"]);
        assert_eq!(scan.functions[0].to_string(), "push(): Adds element to top of stack");
    }

    #[test]
    fn test_c_structs() {
        let code = "struct Node {\n    int data;\n};\ntypedef struct {\n    int top;\n} Stack;\n";
        let scan = scan_syntax(code, "c");
        let names: Vec<_> = scan.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Node", "Stack"]);
    }

    #[test]
    fn test_javascript_forms() {
        let code = "function loadData(url) {\n}\nconst render = (items) => {\n};\nclass Basket {\n    addItem(item) {\n    }\n}\n";
        let scan = scan_syntax(code, "js");
        assert_eq!(scan.classes[0].to_string(), "Basket class: Supporting class for program operations and data management");
        assert_eq!(function_names(&scan), vec!["loadData", "render", "addItem"]);
    }

    #[test]
    fn test_empty_input_yields_empty_scan() {
        let exts = supported_extensions();
        for lang in ["py", "js", "java", "cpp", "c"] {
            assert!(exts.contains(&lang), "missing {lang}");
        }
        for ext in exts {
            for form in [ext.to_string(), format!(".{ext}")] {
                let scan = scan_syntax("", &form);
                assert!(scan.classes.is_empty(), "{form}");
                assert!(scan.functions.is_empty(), "{form}");
            }
        }
    }

    #[test]
    fn test_unknown_extension_is_empty() {
        assert!(scan_syntax("fn main() {}", "rs").is_empty());
        assert!(supported_extensions().contains(&"py"));
    }
}
