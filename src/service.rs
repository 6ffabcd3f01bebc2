//! Request and response envelopes for the three service operations.
//!
//! Field names are camelCase on the wire. Requests are tagged by
//! `operation`: `process-file`, `get-content` or `generate-audio`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::audio::{AudioGenerator, GoogleTts, SpeechSynthesizer};
use crate::config::Config;
use crate::error::ProcessError;
use crate::explain::explain;
use crate::extract::{extract, extract_as};
use crate::finding::Finding;
use crate::narrative::NarrativeDocument;
use crate::source::{ContentKind, FileKind};
use crate::summarize::{char_len, summarize};

/// What `get-content` returns for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    Full,
    Summary,
}

impl ContentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentMode::Full => "full",
            ContentMode::Summary => "summary",
        }
    }
}

impl std::fmt::Display for ContentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(ContentMode::Full),
            "summary" => Ok(ContentMode::Summary),
            other => Err(format!("invalid content type {:?}, must be 'full' or 'summary'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessFileRequest {
    pub file_path: PathBuf,
    #[serde(default)]
    pub file_name: Option<String>,
    pub file_type: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    pub file_path: PathBuf,
    pub content_type: ContentMode,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRequest {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// One request read by `lectern handle`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "operation", rename_all = "kebab-case")]
pub enum Request {
    ProcessFile(ProcessFileRequest),
    GetContent(ContentRequest),
    GenerateAudio(AudioRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessFileResponse {
    pub success: bool,
    pub content_type: ContentKind,
    pub file_type: String,
    pub content_length: usize,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub success: bool,
    pub content: String,
    pub content_type: ContentMode,
    pub is_code: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioResponse {
    pub success: bool,
    pub audio_path: String,
    pub audio_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub status: u16,
    pub error: String,
    pub detail: String,
}

impl From<&ProcessError> for ErrorResponse {
    fn from(err: &ProcessError) -> Self {
        Self {
            success: false,
            status: err.status(),
            error: err.kind().to_string(),
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    ProcessFile(ProcessFileResponse),
    Content(ContentResponse),
    Audio(AudioResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn is_success(&self) -> bool {
        !matches!(self, Response::Error(_))
    }
}

/// The processed content of one file, with the signals behind it.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedContent {
    pub path: PathBuf,
    pub mode: ContentMode,
    pub is_code: bool,
    pub content: String,
    /// Narrative sections; absent when the raw text is returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<NarrativeDocument>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
}

/// Extract `path` and produce its content: an explanation for code, a summary
/// or the full text for documents.
pub fn render_content(path: &Path, mode: ContentMode) -> Result<RenderedContent, ProcessError> {
    let artifact = extract(path)?;
    let rendered = match artifact.kind() {
        ContentKind::Code => {
            let explanation = explain(&artifact);
            RenderedContent {
                path: path.to_path_buf(),
                mode,
                is_code: true,
                content: explanation.text(),
                findings: explanation.findings(),
                document: Some(explanation.document),
            }
        }
        ContentKind::Document => match mode {
            ContentMode::Summary => {
                let summary = summarize(&artifact);
                RenderedContent {
                    path: path.to_path_buf(),
                    mode,
                    is_code: false,
                    findings: summary.findings(),
                    content: summary.text,
                    document: Some(summary.document),
                }
            }
            ContentMode::Full => RenderedContent {
                path: path.to_path_buf(),
                mode,
                is_code: false,
                content: artifact.text().to_string(),
                document: None,
                findings: Vec::new(),
            },
        },
    };
    Ok(rendered)
}

/// First `max_chars` characters, with `...` appended when text was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Dispatches service operations.
pub struct Service<S = GoogleTts> {
    config: Config,
    audio: AudioGenerator<S>,
}

impl Service<GoogleTts> {
    pub fn new(config: Config) -> Result<Self, ProcessError> {
        let audio = AudioGenerator::from_config(&config.audio)?;
        Ok(Self { config, audio })
    }
}

impl<S: SpeechSynthesizer> Service<S> {
    pub fn with_synthesizer(config: Config, synthesizer: S) -> Self {
        let audio = AudioGenerator::new(synthesizer, &config.audio);
        Self { config, audio }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Route by the declared file type, extract, and report a preview.
    pub fn process_file(&self, req: &ProcessFileRequest) -> Result<ProcessFileResponse, ProcessError> {
        let file_type = req.file_type.to_lowercase();
        let kind = FileKind::from_extension(&file_type)?;
        let artifact = extract_as(&req.file_path, kind)?;
        let content_length = char_len(artifact.text());

        info!(
            path = %req.file_path.display(),
            name = req.file_name.as_deref().unwrap_or(""),
            file_type = %file_type,
            chars = content_length,
            "processed file"
        );

        Ok(ProcessFileResponse {
            success: true,
            content_type: artifact.kind(),
            file_type,
            content_length,
            preview: preview(artifact.text(), self.config.preview_chars),
        })
    }

    /// Route by the path's own extension and return the processed content.
    pub fn get_content(&self, req: &ContentRequest) -> Result<ContentResponse, ProcessError> {
        let rendered = render_content(&req.file_path, req.content_type)?;
        info!(
            path = %req.file_path.display(),
            mode = %req.content_type,
            is_code = rendered.is_code,
            chars = char_len(&rendered.content),
            "rendered content"
        );
        Ok(ContentResponse {
            success: true,
            content: rendered.content,
            content_type: req.content_type,
            is_code: rendered.is_code,
        })
    }

    pub fn generate_audio(&self, req: &AudioRequest) -> Result<AudioResponse, ProcessError> {
        let artifact = self.audio.generate(&req.text, req.language.as_deref())?;
        Ok(AudioResponse {
            success: true,
            audio_path: artifact.audio_path,
            audio_url: artifact.audio_url,
        })
    }

    pub fn handle(&self, req: &Request) -> Response {
        let result = match req {
            Request::ProcessFile(r) => self.process_file(r).map(Response::ProcessFile),
            Request::GetContent(r) => self.get_content(r).map(Response::Content),
            Request::GenerateAudio(r) => self.generate_audio(r).map(Response::Audio),
        };
        result.unwrap_or_else(|err| {
            warn!(status = err.status(), error = %err, "request failed");
            Response::Error(ErrorResponse::from(&err))
        })
    }

    /// Decode one JSON request, handle it and encode the response.
    pub fn handle_line(&self, line: &str) -> Result<String, serde_json::Error> {
        let response = match serde_json::from_str::<Request>(line) {
            Ok(req) => self.handle(&req),
            Err(e) => {
                let err = ProcessError::InvalidRequest(e.to_string());
                Response::Error(ErrorResponse::from(&err))
            }
        };
        serde_json::to_string(&response)
    }
}
