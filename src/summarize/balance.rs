//! Length balancing for assembled summaries.
//!
//! Targets step with the normalized input length:
//!
//! | input chars | target |
//! |-------------|--------|
//! | < 1000      | 400    |
//! | < 3000      | 700    |
//! | < 6000      | 1000   |
//! | otherwise   | 1300   |
//!
//! Short summaries are padded with unused sentences; long ones are cut at
//! 1.2 × target and backed off to a sentence boundary.

use lazy_static::lazy_static;
use regex::Regex;

use super::normalize::{char_len, char_prefix, collapse_whitespace, with_period, SentencePool};
use crate::narrative::{NarrativeDocument, Section};

/// Inputs longer than this may receive a technical-details block.
const TECHNICAL_DETAIL_INPUT: usize = 4000;
const TECHNICAL_KEYWORDS: &[&str] = &[
    "framework",
    "library",
    "database",
    "server",
    "client",
    "architecture",
    "design",
    "implementation",
    "feature",
    "module",
    "component",
];

lazy_static! {
    static ref DOUBLE_PERIOD: Regex = Regex::new(r"\.\.").unwrap();
}

/// Chooses a target from the input length and fits a summary to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBalancer {
    input_len: usize,
    target: usize,
}

impl LengthBalancer {
    pub fn for_input_len(input_len: usize) -> Self {
        let target = match input_len {
            0..=999 => 400,
            1000..=2999 => 700,
            3000..=5999 => 1000,
            _ => 1300,
        };
        Self { input_len, target }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Hard upper bound, 1.2 × target.
    pub fn bound(&self) -> usize {
        self.target * 6 / 5
    }

    /// Pad `doc` from the pool when short, then render and cap the result.
    pub fn balance(&self, doc: &mut NarrativeDocument, pool: &mut SentencePool) -> String {
        let mut current = char_len(&doc.render_prose());

        if current < self.target && pool.len() > 5 {
            let budget = self.target - current;
            let mut picked = Vec::new();
            let mut picked_len = 0;
            for (i, sentence) in pool.unused_in(5, 15) {
                if char_len(sentence) <= 15 {
                    continue;
                }
                picked_len += char_len(sentence) + 1;
                picked.push(i);
                if picked_len > budget {
                    break;
                }
            }
            if !picked.is_empty() {
                doc.push(Section::new("More details", pool.take(&picked).join(" ")));
                current = char_len(&doc.render_prose());
            }
        }

        if self.input_len > TECHNICAL_DETAIL_INPUT && current < self.target {
            let picked: Vec<usize> = pool
                .iter()
                .filter(|(i, s)| {
                    let lower = s.to_lowercase();
                    !pool.is_used(*i)
                        && char_len(s) > 40
                        && TECHNICAL_KEYWORDS.iter().any(|k| lower.contains(k))
                })
                .map(|(i, _)| i)
                .take(2)
                .collect();
            if !picked.is_empty() {
                let body = format!("Additional technical details: {}", pool.take(&picked).join(" "));
                doc.push(Section::new("Technical details", body));
            }
        }

        let mut result = tidy(&doc.render_prose());

        // Still well short of the target: spend the rest of the budget on detail.
        let floor = self.target * 7 / 10;
        if char_len(&result) < floor && pool.len() > 8 {
            let extra: Vec<String> = pool
                .unused_in(8, 20)
                .filter(|(_, s)| char_len(s) > 10)
                .map(|(_, s)| with_period(s))
                .collect();
            if !extra.is_empty() {
                let remaining = self.target - char_len(&result);
                let extra = extra.join(" ");
                let body = format!("Additional details: {}", char_prefix(&extra, remaining));
                result.push(' ');
                result.push_str(body.trim_end());
                doc.push(Section::new("Additional details", body));
            }
        }

        self.cap(&result)
    }

    /// Cut to the bound, ending on a sentence boundary.
    pub fn cap(&self, text: &str) -> String {
        let bound = self.bound();
        if char_len(text) <= bound {
            return text.to_string();
        }

        let truncated = char_prefix(text, bound);
        let truncated_chars = char_len(truncated);
        if let Some(idx) = truncated.rfind('.') {
            let position = char_len(&truncated[..idx]);
            // period past 80% of the cut
            if position * 5 > truncated_chars * 4 {
                return truncated[..=idx].to_string();
            }
        }

        // No late sentence boundary: end on a word, then close the sentence.
        let room = char_prefix(text, bound - 1);
        let cut = match room.rfind(char::is_whitespace) {
            Some(idx) if idx > 0 => &room[..idx],
            _ => room,
        };
        let mut out = cut
            .trim_end_matches(|c: char| !c.is_alphanumeric() && c != ')' && c != '.')
            .to_string();
        if !out.ends_with('.') {
            out.push('.');
        }
        out
    }
}

/// Collapse doubled periods and whitespace.
fn tidy(text: &str) -> String {
    let text = DOUBLE_PERIOD.replace_all(text, ".");
    collapse_whitespace(&text)
}
