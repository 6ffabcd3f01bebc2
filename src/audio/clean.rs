//! Text preparation for speech.

use lazy_static::lazy_static;
use regex::Regex;

/// Decorative emoji dropped before synthesis.
const DROPPED_GLYPHS: &[char] = &[
    '🎯', '🔧', '💡', '📊', '⚡', '🚀', '✅', '❌', '🎉', '🎵', '📥', '📱', '🌟', '🔍', '🎨', '🎓',
    '📚', '🔮', '🏗', '\u{fe0f}',
];

/// Symbols read aloud as words, applied in order.
const SPOKEN_SYMBOLS: &[(&str, &str)] = &[
    ("&", " and "),
    ("@", " at "),
    ("#", " hash "),
    ("%", " percent "),
    ("+", " plus "),
    ("=", " equals "),
    ("<", " less than "),
    (">", " greater than "),
    ("|", " or "),
    ("()", ""),
    ("[]", ""),
    ("{}", ""),
    ("→", " leads to "),
    ("←", " comes from "),
    ("↑", " up "),
    ("↓", " down "),
];

lazy_static! {
    static ref RULE_RUN: Regex = Regex::new(r"[=\-_*#]{10,}").unwrap();
    static ref BULLET: Regex = Regex::new(r"[•▶✓]").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref SPACE_RUN: Regex = Regex::new(r" {2,}").unwrap();
    static ref LIST_NUMBER: Regex = Regex::new(r"(?m)^\d+\.\s*").unwrap();
}

/// Strip visual formatting and spell out symbols so text reads naturally.
pub fn clean_for_speech(text: &str) -> String {
    let text = RULE_RUN.replace_all(text, "");
    let text: String = text.chars().filter(|c| !DROPPED_GLYPHS.contains(c)).collect();
    let text = BULLET.replace_all(&text, "Point:");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    let text = SPACE_RUN.replace_all(&text, " ");
    let mut text = LIST_NUMBER.replace_all(&text, "").into_owned();

    for (symbol, spoken) in SPOKEN_SYMBOLS {
        if text.contains(symbol) {
            text = text.replace(symbol, spoken);
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
