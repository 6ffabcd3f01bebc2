//! Learning outcomes and the closing summary sentence.

use super::program_type::{ProgramCategory, ProgramType};
use crate::finding::Finding;

fn any_contains(findings: &[Finding], needles: &[&str]) -> bool {
    findings
        .iter()
        .any(|f| needles.iter().any(|n| f.text.contains(n)))
}

/// Learning outcomes gated on concept and algorithm labels.
pub fn synthesize_outcomes(
    program: &ProgramType,
    concepts: &[Finding],
    algorithms: &[Finding],
    language: &str,
) -> Vec<String> {
    let mut outcomes = vec![
        format!("Fundamental {language} programming syntax and structure"),
        "Problem-solving approach and logical thinking".to_string(),
    ];

    let gated: [(&[Finding], &[&str], &str); 11] = [
        (concepts, &["String"], "String manipulation techniques and text processing"),
        (concepts, &["Array", "List"], "Array/List operations and data organization"),
        (concepts, &["Object-Oriented"], "Object-oriented programming principles and design patterns"),
        (concepts, &["Loop"], "Iteration techniques and loop optimization"),
        (concepts, &["Conditional"], "Decision-making logic and control flow"),
        (algorithms, &["Sort"], "Sorting algorithms and time complexity analysis"),
        (algorithms, &["Search"], "Search techniques and efficiency optimization"),
        (algorithms, &["Dynamic Programming"], "Dynamic programming and memoization strategies"),
        (concepts, &["Linked List"], "Pointer manipulation and dynamic data structures"),
        (concepts, &["Stack", "Queue"], "Stack and Queue operations for data management"),
        (concepts, &["Tree", "Graph"], "Hierarchical and network data structure implementation"),
    ];
    for (findings, needles, outcome) in gated {
        if any_contains(findings, needles) {
            outcomes.push(outcome.to_string());
        }
    }

    if matches!(
        program.category,
        ProgramCategory::DataStructures | ProgramCategory::Algorithms
    ) {
        outcomes.push("Algorithm design and complexity analysis".to_string());
        outcomes.push("Data structure selection for optimal performance".to_string());
    }

    outcomes.push("Code debugging and testing methodologies".to_string());
    outcomes.push("Best practices for clean and maintainable code".to_string());
    outcomes
}

/// One-paragraph summary from the category and declaration counts.
pub fn summary_sentence(
    program: &ProgramType,
    language: &str,
    function_count: usize,
    class_count: usize,
) -> String {
    let mut parts = vec![match program.category {
        ProgramCategory::StringManipulation => format!(
            "This comprehensive {language} string manipulation program demonstrates essential text processing algorithms."
        ),
        ProgramCategory::DataStructures => format!(
            "This {language} program showcases fundamental data structures with practical implementations and operations."
        ),
        ProgramCategory::Algorithms => format!(
            "This {language} program implements important algorithms for efficient data processing and problem-solving."
        ),
        _ => format!(
            "This {language} program demonstrates programming fundamentals with practical examples and implementations."
        ),
    }];

    if function_count > 0 {
        parts.push(format!(
            "With {function_count} functions, it provides hands-on experience with modular programming and code organization."
        ));
    }
    if class_count > 0 {
        parts.push(format!(
            "The {class_count} classes showcase object-oriented design and encapsulation principles."
        ));
    }
    parts.push(
        "Perfect for learning core programming concepts and building a strong foundation in software development!"
            .to_string(),
    );
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::FindingKind;

    fn program(category: ProgramCategory) -> ProgramType {
        ProgramType {
            category,
            description: String::new(),
        }
    }

    fn concept(text: &str) -> Finding {
        Finding::new(FindingKind::Concept, "test", text)
    }

    #[test]
    fn test_baseline_outcomes() {
        let outcomes = synthesize_outcomes(&program(ProgramCategory::General), &[], &[], "C");
        assert_eq!(
            outcomes,
            vec![
                "Fundamental C programming syntax and structure",
                "Problem-solving approach and logical thinking",
                "Code debugging and testing methodologies",
                "Best practices for clean and maintainable code",
            ]
        );
    }

    #[test]
    fn test_gated_outcomes() {
        let concepts = vec![concept("Stacks - LIFO"), concept("Loops - repeating")];
        let algorithms = vec![Finding::new(FindingKind::Algorithm, "test", "Bubble Sort — O(n²)")];
        let outcomes = synthesize_outcomes(
            &program(ProgramCategory::Algorithms),
            &concepts,
            &algorithms,
            "Python",
        );
        assert!(outcomes.contains(&"Iteration techniques and loop optimization".to_string()));
        assert!(outcomes.contains(&"Sorting algorithms and time complexity analysis".to_string()));
        assert!(outcomes.contains(&"Stack and Queue operations for data management".to_string()));
        assert!(outcomes.contains(&"Algorithm design and complexity analysis".to_string()));
        assert_eq!(outcomes.last().unwrap(), "Best practices for clean and maintainable code");
    }

    #[test]
    fn test_summary_sentence() {
        let summary = summary_sentence(&program(ProgramCategory::Algorithms), "Python", 2, 0);
        assert!(summary.starts_with("This Python program implements important algorithms"));
        assert!(summary.contains("With 2 functions"));
        assert!(!summary.contains("classes showcase"));
        assert!(summary.ends_with("foundation in software development!"));
    }
}
