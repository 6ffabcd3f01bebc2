//! PDF text extraction.

use anyhow::anyhow;
use tracing::warn;

use super::repair::repair_pdf_text;
use crate::error::ProcessError;

const FORMAT: &str = "PDF";
pub const EMPTY_PDF: &str = "No text content found in PDF";

/// Extract and repair the text of an in-memory PDF.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ProcessError> {
    // pdf-extract can panic on malformed font programs
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    let raw = match outcome {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return Err(ProcessError::extraction(FORMAT, e)),
        Err(_) => {
            warn!(bytes = bytes.len(), "PDF parser panicked");
            return Err(ProcessError::extraction(
                FORMAT,
                anyhow!("parser panicked on malformed content"),
            ));
        }
    };

    let text = repair_pdf_text(&raw);
    if text.is_empty() {
        Ok(EMPTY_PDF.to_string())
    } else {
        Ok(text)
    }
}
