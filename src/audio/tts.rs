//! Speech synthesis over the Google Translate TTS endpoint.
//!
//! The endpoint accepts at most about 100 characters per request, so text is
//! split on word boundaries and the MP3 segments are concatenated in order.

use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::AudioConfig;

/// Longest piece of text sent in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Errors from a speech backend.
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("speech endpoint returned HTTP {0}")]
    Status(u16),
    #[error("speech endpoint returned no audio")]
    EmptyResponse,
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Turns cleaned text into MP3 bytes.
pub trait SpeechSynthesizer {
    fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError>;
}

/// Client for the public Google Translate speech endpoint.
pub struct GoogleTts {
    http: Client,
    endpoint: String,
    timeout: Duration,
    max_concurrent: usize,
}

impl GoogleTts {
    pub fn new(config: &AudioConfig) -> Result<Self, SpeechError> {
        let http = Client::builder()
            .user_agent(concat!("lectern/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            max_concurrent: config.max_concurrent_requests.max(1),
        })
    }

    async fn fetch_segment(
        &self,
        chunk: &str,
        language: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, SpeechError> {
        let idx = index.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else {
                    SpeechError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_all(&self, chunks: &[String], language: &str) -> Result<Vec<u8>, SpeechError> {
        let total = chunks.len();
        let segments: Vec<Result<Vec<u8>, SpeechError>> = stream::iter(chunks.iter().enumerate())
            .map(|(index, chunk)| self.fetch_segment(chunk, language, index, total))
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut audio = Vec::new();
        for segment in segments {
            audio.extend(segment?);
        }
        Ok(audio)
    }
}

impl SpeechSynthesizer for GoogleTts {
    fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        let chunks = split_chunks(text, MAX_CHUNK_CHARS);
        debug!(chunks = chunks.len(), language, "requesting speech segments");

        let runtime = tokio::runtime::Runtime::new()?;
        let audio = runtime.block_on(self.fetch_all(&chunks, language))?;
        if audio.is_empty() {
            return Err(SpeechError::EmptyResponse);
        }
        Ok(audio)
    }
}

/// Split `text` into pieces of at most `max_chars` characters, breaking
/// between words. A single word longer than the limit is cut mid-word.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_word_boundaries() {
        let text = "alpha beta gamma delta";
        assert_eq!(split_chunks(text, 11), vec!["alpha beta", "gamma delta"]);
        assert_eq!(split_chunks(text, 100), vec![text]);
    }

    #[test]
    fn test_split_long_word() {
        let chunks = split_chunks("ab abcdefgh c", 3);
        assert_eq!(chunks, vec!["ab", "abc", "def", "gh", "c"]);
    }

    #[test]
    fn test_chunks_respect_limit() {
        let text = "word ".repeat(300);
        let chunks = split_chunks(&text, MAX_CHUNK_CHARS);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert_eq!(chunks.join(" "), text.trim_end());
    }

    #[test]
    fn test_empty_text() {
        assert!(split_chunks("   ", 10).is_empty());
    }
}
