//! Text normalization and the meaningful-sentence pool.

use lazy_static::lazy_static;
use regex::Regex;

/// Raw inputs shorter than this are returned unchanged.
pub const MIN_SUMMARY_INPUT: usize = 100;

/// Sentences need at least this many tokens to count as meaningful.
const MIN_SENTENCE_TOKENS: usize = 3;

lazy_static! {
    static ref SLIDE_MARKER: Regex = Regex::new(r"(?i)slide \d+:").unwrap();
    static ref PAGE_MARKER: Regex = Regex::new(r"(?i)page \d+").unwrap();
    static ref NOISE_PHRASE: Regex = Regex::new(r"(?i)roll no|session 20|semester").unwrap();
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip slide/page markers and noise phrases, collapsing whitespace.
pub fn normalize_text(text: &str) -> String {
    let text = collapse_whitespace(text);
    let text = SLIDE_MARKER.replace_all(&text, "");
    let text = PAGE_MARKER.replace_all(&text, "");
    let text = NOISE_PHRASE.replace_all(&text, "");
    collapse_whitespace(&text)
}

/// Character count, the unit every length rule uses.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// First `n` characters of `text`.
pub fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Restore the terminating period that sentence splitting removed.
pub fn with_period(sentence: &str) -> String {
    format!("{sentence}.")
}

/// Meaningful sentences of a document, with a record of which ones the
/// summary has already used.
#[derive(Debug, Clone, Default)]
pub struct SentencePool {
    sentences: Vec<String>,
    used: Vec<bool>,
}

impl SentencePool {
    /// Split on `.` and keep trimmed fragments of three or more tokens.
    pub fn from_text(text: &str) -> Self {
        let sentences: Vec<String> = text
            .split('.')
            .map(str::trim)
            .filter(|s| s.split_whitespace().count() >= MIN_SENTENCE_TOKENS)
            .map(str::to_string)
            .collect();
        let used = vec![false; sentences.len()];
        Self { sentences, used }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.sentences.get(index).map(String::as_str)
    }

    pub fn is_used(&self, index: usize) -> bool {
        self.used.get(index).copied().unwrap_or(false)
    }

    /// Mark sentences as used and return them with periods restored.
    pub fn take(&mut self, indices: &[usize]) -> Vec<String> {
        let mut taken = Vec::with_capacity(indices.len());
        for &i in indices {
            if let Some(sentence) = self.sentences.get(i) {
                self.used[i] = true;
                taken.push(with_period(sentence));
            }
        }
        taken
    }

    /// Unused sentences in `start..end` (clamped), with their indices.
    pub fn unused_in(&self, start: usize, end: usize) -> impl Iterator<Item = (usize, &str)> {
        let end = end.min(self.sentences.len());
        let start = start.min(end);
        (start..end)
            .filter(move |&i| !self.used[i])
            .map(move |i| (i, self.sentences[i].as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.sentences.iter().map(String::as_str).enumerate()
    }
}
