//! Speech rendering of explanations and summaries.

mod clean;
mod tts;

pub use clean::clean_for_speech;
pub use tts::{split_chunks, GoogleTts, SpeechError, SpeechSynthesizer, MAX_CHUNK_CHARS};

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::config::{is_valid_language, AudioConfig};
use crate::error::ProcessError;

/// A written MP3 file and where it is served from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioArtifact {
    #[serde(skip)]
    pub file: PathBuf,
    pub audio_path: String,
    pub audio_url: String,
}

/// Cleans text, synthesizes it and stores the result under a fresh name.
pub struct AudioGenerator<S> {
    synthesizer: S,
    output_dir: PathBuf,
    base_url: String,
    default_language: String,
}

impl AudioGenerator<GoogleTts> {
    /// Generator backed by the configured speech endpoint.
    pub fn from_config(config: &AudioConfig) -> Result<Self, ProcessError> {
        let tts = GoogleTts::new(config).map_err(|e| ProcessError::AudioGeneration(e.to_string()))?;
        Ok(Self::new(tts, config))
    }
}

impl<S: SpeechSynthesizer> AudioGenerator<S> {
    pub fn new(synthesizer: S, config: &AudioConfig) -> Self {
        Self {
            synthesizer,
            output_dir: config.output_dir.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_language: config.language.clone(),
        }
    }

    /// Render `text` to an MP3 file. `language` falls back to the configured default.
    pub fn generate(&self, text: &str, language: Option<&str>) -> Result<AudioArtifact, ProcessError> {
        let language = language.unwrap_or(&self.default_language);
        if !is_valid_language(language) {
            return Err(ProcessError::AudioGeneration(format!(
                "invalid language code {:?}",
                language
            )));
        }

        let cleaned = clean_for_speech(text);
        if cleaned.is_empty() {
            return Err(ProcessError::AudioGeneration("no speakable text".to_string()));
        }

        let audio = self
            .synthesizer
            .synthesize(&cleaned, language)
            .map_err(|e| ProcessError::AudioGeneration(e.to_string()))?;

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ProcessError::AudioGeneration(format!(
                "cannot create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;
        let file = self.output_dir.join(format!("{}.mp3", Uuid::new_v4()));
        fs::write(&file, &audio).map_err(|e| {
            ProcessError::AudioGeneration(format!("cannot write {}: {}", file.display(), e))
        })?;

        let audio_path = url_path(&file);
        let audio_url = format!("{}/{}", self.base_url, audio_path);
        info!(path = %file.display(), bytes = audio.len(), language, "generated audio");

        Ok(AudioArtifact {
            file,
            audio_path,
            audio_url,
        })
    }
}

/// Path with forward slashes, as used in URLs.
fn url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .filter(|c| c != "/")
        .collect::<Vec<_>>()
        .join("/")
}
