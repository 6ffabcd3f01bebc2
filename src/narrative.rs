//! Ordered narrative documents and audio-safe re-encoding.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Width of the rule drawn before a divider section.
pub const SECTION_RULE_WIDTH: usize = 60;

/// Token that replaces section rules in audio-safe text.
const RULE_TOKEN: &str = "--- End of Analysis ---";

/// Decorative glyphs and the word tokens that replace them.
/// Multi-codepoint sequences come before their bare forms.
const GLYPH_TOKENS: &[(&str, &str)] = &[
    ("🏗", "STRUCTURE:"),
    ("🎯", "TARGET:"),
    ("🔧", "FUNCTIONS:"),
    ("💡", "CONCEPTS:"),
    ("⚡", "ALGORITHMS:"),
    ("🌟", "FEATURES:"),
    ("🎓", "LEARNING:"),
    ("📚", "SUMMARY:"),
    ("✓", "Check:"),
    ("•", "Point:"),
];

/// Emoji presentation selector; carries no speakable content.
const VARIATION_SELECTOR: char = '\u{fe0f}';

lazy_static! {
    static ref SECTION_RULE: Regex = Regex::new(r"={10,}").unwrap();
}

/// One titled block of assembled prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub body: String,
    /// Draw a section rule before this section when rendering.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub divider: bool,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            divider: false,
        }
    }

    pub fn with_divider(mut self) -> Self {
        self.divider = true;
        self
    }
}

/// Sections in pipeline order. Consumers may rely on the ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NarrativeDocument {
    sections: Vec<Section>,
}

impl NarrativeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Find a section by exact title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Render as headed blocks separated by blank lines.
    pub fn render(&self) -> String {
        let mut blocks = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            let mut block = String::new();
            if section.divider {
                block.push_str(&"=".repeat(SECTION_RULE_WIDTH));
                block.push('\n');
            }
            block.push_str(&section.title);
            if !section.body.is_empty() {
                if !section.title.is_empty() {
                    block.push('\n');
                }
                block.push_str(&section.body);
            }
            blocks.push(block);
        }
        blocks.join("\n\n")
    }

    /// Render bodies only, joined into running prose.
    pub fn render_prose(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.body.as_str())
            .filter(|b| !b.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Copy of the document with every title and body made audio-safe.
    pub fn audio_safe(&self) -> NarrativeDocument {
        NarrativeDocument {
            sections: self
                .sections
                .iter()
                .map(|s| Section {
                    title: audio_safe(&s.title),
                    body: audio_safe(&s.body),
                    divider: s.divider,
                })
                .collect(),
        }
    }
}

/// Replace decorative glyphs and section rules with word tokens.
///
/// The output never contains a glyph from the table or a run of ten or more
/// `=`, so applying this twice is the same as applying it once.
pub fn audio_safe(text: &str) -> String {
    let mut out: String = text.chars().filter(|c| *c != VARIATION_SELECTOR).collect();
    for (glyph, token) in GLYPH_TOKENS {
        if out.contains(glyph) {
            out = out.replace(glyph, token);
        }
    }
    SECTION_RULE.replace_all(&out, RULE_TOKEN).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_glyphs_replaced() {
        let text = "🎯 WHAT THIS CODE DOES:\n🏗️ CLASSES\n• item\n✓ outcome";
        let safe = audio_safe(text);
        assert_eq!(
            safe,
            "TARGET: WHAT THIS CODE DOES:\nSTRUCTURE: CLASSES\nPoint: item\nCheck: outcome"
        );
    }

    #[test]
    fn test_rule_replaced() {
        let text = format!("end\n{}\n📚 SUMMARY:", "=".repeat(60));
        assert_eq!(audio_safe(&text), "end\n--- End of Analysis ---\nSUMMARY: SUMMARY:");
        // Short runs are ordinary text.
        assert_eq!(audio_safe("a == b"), "a == b");
    }

    #[test]
    fn test_selector_between_rules() {
        let text = "=====\u{fe0f}=====";
        let once = audio_safe(text);
        assert_eq!(once, RULE_TOKEN);
        assert_eq!(audio_safe(&once), once);
    }

    #[test]
    fn test_render_order_and_divider() {
        let mut doc = NarrativeDocument::new();
        doc.push(Section::new("First", "one"));
        doc.push(Section::new("Second", "").with_divider());
        let rendered = doc.render();
        assert!(rendered.starts_with("First\none\n\n===="));
        assert!(rendered.ends_with("\nSecond"));
        assert_eq!(doc.render_prose(), "one");
    }

    proptest! {
        #[test]
        fn audio_safe_is_idempotent(s in "([a-z =•✓🎯🏗📚⚡\u{fe0f}\n]){0,80}") {
            let once = audio_safe(&s);
            prop_assert_eq!(audio_safe(&once), once.clone());
            for (glyph, _) in GLYPH_TOKENS {
                prop_assert!(!once.contains(glyph));
            }
        }
    }
}
