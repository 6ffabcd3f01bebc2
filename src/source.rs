//! Source artifacts and file-kind routing.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ProcessError;

/// Display names for source languages, keyed by extension without the dot.
static LANGUAGE_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "py" => "Python",
    "js" => "JavaScript",
    "java" => "Java",
    "cpp" => "C++",
    "c" => "C",
    "cs" => "C#",
    "php" => "PHP",
    "rb" => "Ruby",
    "go" => "Go",
    "rs" => "Rust",
    "kt" => "Kotlin",
    "swift" => "Swift",
    "ts" => "TypeScript",
    "scala" => "Scala",
    "dart" => "Dart",
    "r" => "R",
    "m" => "Objective-C",
    "pl" => "Perl",
    "sh" => "Shell",
    "sql" => "SQL",
    "html" => "HTML",
    "css" => "CSS",
    "jsx" => "React JSX",
    "vue" => "Vue.js",
};

/// Code extensions accepted at the routing boundary.
pub const CODE_EXTENSIONS: &[&str] = &["py", "js", "java", "cpp", "c"];

/// Whether an artifact is prose or source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Document,
    Code,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Document => write!(f, "document"),
            ContentKind::Code => write!(f, "code"),
        }
    }
}

/// Routing decision for an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Word,
    Presentation,
    Text,
    Code,
}

impl FileKind {
    /// Route a file extension (with or without the leading dot).
    pub fn from_extension(ext: &str) -> Result<Self, ProcessError> {
        match normalize_extension(ext).as_str() {
            "pdf" => Ok(FileKind::Pdf),
            "docx" | "doc" => Ok(FileKind::Word),
            "pptx" => Ok(FileKind::Presentation),
            "txt" => Ok(FileKind::Text),
            e if CODE_EXTENSIONS.contains(&e) => Ok(FileKind::Code),
            _ => Err(ProcessError::UnsupportedFileType(ext.to_string())),
        }
    }

    /// Route a path by its extension.
    pub fn from_path(path: &Path) -> Result<Self, ProcessError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    pub fn content_kind(&self) -> ContentKind {
        match self {
            FileKind::Code => ContentKind::Code,
            _ => ContentKind::Document,
        }
    }
}

/// Lowercase an extension and strip a leading dot.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Display name of the language for an extension, "Programming" when unknown.
pub fn language_name(ext: &str) -> &'static str {
    LANGUAGE_NAMES
        .get(normalize_extension(ext).as_str())
        .copied()
        .unwrap_or("Programming")
}

/// Raw text of one input together with its declared kind.
#[derive(Debug, Clone)]
pub struct SourceArtifact {
    text: String,
    kind: ContentKind,
    extension: String,
}

impl SourceArtifact {
    pub fn code(text: impl Into<String>, extension: &str) -> Self {
        Self {
            text: text.into(),
            kind: ContentKind::Code,
            extension: normalize_extension(extension),
        }
    }

    pub fn document(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ContentKind::Document,
            extension: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Normalized extension (no dot); empty for documents.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Language display name; only meaningful for code.
    pub fn language(&self) -> &'static str {
        language_name(&self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing() {
        assert_eq!(FileKind::from_extension(".pdf").unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_extension("DOCX").unwrap(), FileKind::Word);
        assert_eq!(FileKind::from_extension(".doc").unwrap(), FileKind::Word);
        assert_eq!(FileKind::from_extension(".pptx").unwrap(), FileKind::Presentation);
        assert_eq!(FileKind::from_extension(".txt").unwrap(), FileKind::Text);
        for ext in [".py", ".js", ".java", ".cpp", ".c"] {
            assert_eq!(FileKind::from_extension(ext).unwrap(), FileKind::Code);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let err = FileKind::from_extension(".xyz").unwrap_err();
        assert!(matches!(err, ProcessError::UnsupportedFileType(ref e) if e == ".xyz"));
        // Languages with a display name are still not routable as code.
        assert!(FileKind::from_extension(".rs").is_err());
        assert!(FileKind::from_path(Path::new("Makefile")).is_err());
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name(".py"), "Python");
        assert_eq!(language_name("CPP"), "C++");
        assert_eq!(language_name(".xyz"), "Programming");
    }

    #[test]
    fn test_artifact() {
        let artifact = SourceArtifact::code("print(1)", ".PY");
        assert_eq!(artifact.kind(), ContentKind::Code);
        assert_eq!(artifact.extension(), "py");
        assert_eq!(artifact.language(), "Python");
    }
}
