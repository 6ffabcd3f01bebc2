//! Error taxonomy for request processing.
//!
//! Only I/O and library failures are errors. Heuristic stages never fail;
//! missing signals degrade to fallback phrases instead.

use thiserror::Error;

/// Errors that can occur while serving a request.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{format} extraction failed: {source}")]
    Extraction {
        format: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("unsupported file type: {0:?}")]
    UnsupportedFileType(String),
    #[error("audio generation failed: {0}")]
    AudioGeneration(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ProcessError {
    /// Wrap an underlying library error with the format it came from.
    pub fn extraction(format: &'static str, source: impl Into<anyhow::Error>) -> Self {
        ProcessError::Extraction {
            format,
            source: source.into(),
        }
    }

    /// HTTP status reported at the request boundary.
    pub fn status(&self) -> u16 {
        match self {
            ProcessError::UnsupportedFileType(_) | ProcessError::InvalidRequest(_) => 400,
            ProcessError::Extraction { .. } | ProcessError::AudioGeneration(_) => 500,
        }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessError::Extraction { .. } => "extraction_failure",
            ProcessError::UnsupportedFileType(_) => "unsupported_file_type",
            ProcessError::AudioGeneration(_) => "audio_generation_failure",
            ProcessError::InvalidRequest(_) => "invalid_request",
        }
    }
}
