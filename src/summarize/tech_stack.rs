//! Technology stack detection.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::finding::{Finding, FindingKind};

const DETECTOR: &str = "tech_stack";

/// Stack categories, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TechCategory {
    Frontend,
    Backend,
    Database,
    #[serde(rename = "Tools & Frameworks")]
    Tools,
}

impl TechCategory {
    pub const ALL: [TechCategory; 4] = [
        TechCategory::Frontend,
        TechCategory::Backend,
        TechCategory::Database,
        TechCategory::Tools,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TechCategory::Frontend => "Frontend",
            TechCategory::Backend => "Backend",
            TechCategory::Database => "Database",
            TechCategory::Tools => "Tools & Frameworks",
        }
    }
}

impl std::fmt::Display for TechCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct TechEntry {
    keywords: &'static [&'static str],
    category: TechCategory,
    name: &'static str,
}

const fn tech(
    keywords: &'static [&'static str],
    category: TechCategory,
    name: &'static str,
) -> TechEntry {
    TechEntry {
        keywords,
        category,
        name,
    }
}

use TechCategory::{Backend, Database, Frontend, Tools};

static TECH_TABLE: &[TechEntry] = &[
    tech(&["react"], Frontend, "React"),
    tech(&["angular"], Frontend, "Angular"),
    tech(&["vue"], Frontend, "Vue.js"),
    tech(&["vite"], Frontend, "Vite"),
    tech(&["next.js", "nextjs"], Frontend, "Next.js"),
    tech(&["typescript"], Frontend, "TypeScript"),
    tech(&["javascript"], Frontend, "JavaScript"),
    tech(&["html"], Frontend, "HTML"),
    tech(&["css"], Frontend, "CSS"),
    tech(&["tailwind"], Frontend, "Tailwind CSS"),
    tech(&["bootstrap"], Frontend, "Bootstrap"),
    tech(&["material ui", "material-ui", "mui"], Frontend, "Material UI"),
    tech(&["radix"], Frontend, "Radix UI"),
    tech(&["node", "nodejs"], Backend, "Node.js"),
    tech(&["express"], Backend, "Express"),
    tech(&["django"], Backend, "Django"),
    tech(&["flask"], Backend, "Flask"),
    tech(&["spring"], Backend, "Spring Boot"),
    tech(&["laravel"], Backend, "Laravel"),
    tech(&["php"], Backend, "PHP"),
    tech(&["python"], Backend, "Python"),
    tech(&["java"], Backend, "Java"),
    tech(&["ruby"], Backend, "Ruby"),
    tech(&["golang"], Backend, "Go"),
    tech(&["rust"], Backend, "Rust"),
    tech(&["mongodb"], Database, "MongoDB"),
    tech(&["mysql"], Database, "MySQL"),
    tech(&["postgresql"], Database, "PostgreSQL"),
    tech(&["postgres"], Database, "PostgreSQL"),
    tech(&["redis"], Database, "Redis"),
    tech(&["sqlite"], Database, "SQLite"),
    tech(&["oracle"], Database, "Oracle"),
    tech(&["sql"], Database, "SQL"),
    tech(&["nosql"], Database, "NoSQL"),
    tech(&["firebase"], Database, "Firebase"),
    tech(&["mongoose"], Database, "Mongoose"),
    tech(&["docker"], Tools, "Docker"),
    tech(&["kubernetes"], Tools, "Kubernetes"),
    tech(&["aws"], Tools, "AWS"),
    tech(&["azure"], Tools, "Azure"),
    tech(&["git"], Tools, "Git"),
    tech(&["github"], Tools, "GitHub"),
    tech(&["jenkins"], Tools, "Jenkins"),
    tech(&["nginx"], Tools, "Nginx"),
    tech(&["apache"], Tools, "Apache"),
    tech(&["jwt"], Tools, "JWT"),
    tech(&["oauth"], Tools, "OAuth"),
    tech(&["graphql"], Tools, "GraphQL"),
    tech(&["rest api", "restful"], Tools, "REST API"),
    tech(&["api"], Tools, "API"),
    tech(&["jest"], Tools, "Jest"),
    tech(&["mocha"], Tools, "Mocha"),
    tech(&["eslint"], Tools, "ESLint"),
    tech(&["prettier"], Tools, "Prettier"),
    tech(&["webpack"], Tools, "Webpack"),
    tech(&["babel"], Tools, "Babel"),
];

lazy_static! {
    static ref TECH_PATTERNS: Vec<Regex> = TECH_TABLE
        .iter()
        .map(|entry| {
            let alternatives: Vec<String> = entry.keywords.iter().map(|k| regex::escape(k)).collect();
            Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).unwrap()
        })
        .collect();
}

/// One detected technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechItem {
    pub category: TechCategory,
    pub name: &'static str,
}

/// Detected technologies, grouped per category in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechStack {
    items: Vec<TechItem>,
}

impl TechStack {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[TechItem] {
        &self.items
    }

    /// Names detected for one category.
    pub fn names(&self, category: TechCategory) -> Vec<&'static str> {
        self.items
            .iter()
            .filter(|i| i.category == category)
            .map(|i| i.name)
            .collect()
    }

    /// "Frontend: React, Vite; Database: MongoDB"
    pub fn describe(&self) -> String {
        TechCategory::ALL
            .iter()
            .filter_map(|category| {
                let names = self.names(*category);
                (!names.is_empty()).then(|| format!("{}: {}", category, names.join(", ")))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Summary sentence, or `None` when nothing was detected.
    pub fn sentence(&self) -> Option<String> {
        (!self.is_empty()).then(|| format!("Technology stack includes {}.", self.describe()))
    }

    pub fn findings(&self) -> Vec<Finding> {
        self.items
            .iter()
            .map(|i| {
                Finding::new(
                    FindingKind::TechStackItem,
                    DETECTOR,
                    format!("{}: {}", i.category, i.name),
                )
            })
            .collect()
    }
}

/// Detect technologies named in `text` on word boundaries.
pub fn detect_tech_stack(text: &str) -> TechStack {
    let mut stack = TechStack::default();
    for (entry, pattern) in TECH_TABLE.iter().zip(TECH_PATTERNS.iter()) {
        if !pattern.is_match(text) {
            continue;
        }
        let duplicate = stack
            .items
            .iter()
            .any(|i| i.category == entry.category && i.name == entry.name);
        if !duplicate {
            stack.items.push(TechItem {
                category: entry.category,
                name: entry.name,
            });
        }
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_description() {
        let stack = detect_tech_stack("Built with React and Vite, storing data in MongoDB via Express.");
        assert_eq!(
            stack.describe(),
            "Frontend: React, Vite; Backend: Express; Database: MongoDB"
        );
        assert_eq!(
            stack.sentence().unwrap(),
            "Technology stack includes Frontend: React, Vite; Backend: Express; Database: MongoDB."
        );
    }

    #[test]
    fn test_word_boundaries() {
        let stack = detect_tech_stack("JavaScript on MySQL, pushed with GitHub");
        assert_eq!(stack.names(TechCategory::Backend), Vec::<&str>::new());
        assert_eq!(stack.names(TechCategory::Database), vec!["MySQL"]);
        assert_eq!(stack.names(TechCategory::Tools), vec!["GitHub"]);
    }

    #[test]
    fn test_aliases_deduplicated() {
        let stack = detect_tech_stack("postgres or PostgreSQL");
        assert_eq!(stack.names(TechCategory::Database), vec!["PostgreSQL"]);
        assert_eq!(stack.findings().len(), 1);
    }

    #[test]
    fn test_node_dot_js() {
        let stack = detect_tech_stack("a Node.js service");
        assert_eq!(stack.names(TechCategory::Backend), vec!["Node.js"]);
        assert!(detect_tech_stack("nothing here").sentence().is_none());
    }
}
