//! Text extraction from supported input files.

mod office;
mod pdf;
mod repair;

pub use office::{extract_docx, extract_pptx, EMPTY_DOCUMENT, EMPTY_PRESENTATION};
pub use pdf::{extract_pdf, EMPTY_PDF};
pub use repair::repair_pdf_text;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ProcessError;
use crate::source::{FileKind, SourceArtifact};

/// Route `path` by extension and extract its text.
pub fn extract(path: &Path) -> Result<SourceArtifact, ProcessError> {
    let kind = FileKind::from_path(path)?;
    extract_as(path, kind)
}

/// Extract `path` as the given kind, regardless of its own extension.
pub fn extract_as(path: &Path, kind: FileKind) -> Result<SourceArtifact, ProcessError> {
    let artifact = match kind {
        FileKind::Pdf => SourceArtifact::document(extract_pdf(&read_bytes(path, "PDF")?)?),
        FileKind::Word => SourceArtifact::document(extract_docx(&read_bytes(path, "DOCX")?)?),
        FileKind::Presentation => {
            SourceArtifact::document(extract_pptx(&read_bytes(path, "PPTX")?)?)
        }
        FileKind::Text => SourceArtifact::document(read_text(path, "Text file")?),
        FileKind::Code => {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            SourceArtifact::code(read_text(path, "Code file")?, ext)
        }
    };

    debug!(
        path = %path.display(),
        kind = %artifact.kind(),
        chars = artifact.text().chars().count(),
        "extracted content"
    );
    Ok(artifact)
}

fn read_bytes(path: &Path, format: &'static str) -> Result<Vec<u8>, ProcessError> {
    fs::read(path).map_err(|e| ProcessError::extraction(format, e))
}

fn read_text(path: &Path, format: &'static str) -> Result<String, ProcessError> {
    fs::read_to_string(path).map_err(|e| ProcessError::extraction(format, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ContentKind;
    use tempfile::TempDir;

    #[test]
    fn test_code_file_keeps_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Sort.JAVA");
        fs::write(&path, "class Sort {}").unwrap();
        let artifact = extract(&path).unwrap();
        assert_eq!(artifact.kind(), ContentKind::Code);
        assert_eq!(artifact.extension(), "java");
        assert_eq!(artifact.language(), "Java");
    }

    #[test]
    fn test_text_file_is_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "plain notes").unwrap();
        let artifact = extract(&path).unwrap();
        assert_eq!(artifact.kind(), ContentKind::Document);
        assert_eq!(artifact.text(), "plain notes");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = extract(Path::new("archive.xyz")).unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(err.kind(), "unsupported_file_type");
    }

    #[test]
    fn test_missing_file_is_extraction_failure() {
        let err = extract(Path::new("/nonexistent/lectern/notes.txt")).unwrap_err();
        assert_eq!(err.status(), 500);
        assert!(err.to_string().starts_with("Text file extraction failed"));
    }
}
