//! Character-set classification of a label.
//!
//! A deterministic function of the label's code points. The result is a
//! descriptive attribute only; layout never branches on it.

use std::fmt;

use crate::glyph::{GlyphClass, classify_cluster};
use crate::grapheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    /// ASCII digits only.
    Digit,
    /// ASCII letters only.
    Letter,
    /// ASCII letters and digits.
    Alphanumeric,
    /// Every grapheme is an emoji.
    Emoji,
    /// Letters or digits outside ASCII (optionally mixed with ASCII ones), no emoji.
    International,
    /// Anything else: punctuation, symbols, emoji mixed with text.
    Mixed,
}

impl CharacterSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterSet::Digit => "digit",
            CharacterSet::Letter => "letter",
            CharacterSet::Alphanumeric => "alphanumeric",
            CharacterSet::Emoji => "emoji",
            CharacterSet::International => "international",
            CharacterSet::Mixed => "mixed",
        }
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the dominant composition of `label`.
pub fn character_set(label: &str) -> CharacterSet {
    if label.is_empty() {
        return CharacterSet::Mixed;
    }
    if label.is_ascii() {
        if label.bytes().all(|b| b.is_ascii_digit()) {
            return CharacterSet::Digit;
        }
        if label.bytes().all(|b| b.is_ascii_alphabetic()) {
            return CharacterSet::Letter;
        }
        if label.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return CharacterSet::Alphanumeric;
        }
        return CharacterSet::Mixed;
    }

    let mut all_emoji = true;
    let mut all_word = true;
    for cluster in grapheme::iter(label) {
        let class = classify_cluster(cluster);
        let is_emoji = class == GlyphClass::Emoji;
        all_emoji &= is_emoji;
        let base_is_word = cluster
            .chars()
            .next()
            .map(char::is_alphanumeric)
            .unwrap_or(false);
        all_word &= !is_emoji && base_is_word;
    }

    if all_emoji {
        CharacterSet::Emoji
    } else if all_word {
        CharacterSet::International
    } else {
        CharacterSet::Mixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_sets() {
        assert_eq!(character_set("12345"), CharacterSet::Digit);
        assert_eq!(character_set("alice"), CharacterSet::Letter);
        assert_eq!(character_set("alice42"), CharacterSet::Alphanumeric);
        assert_eq!(character_set("al-ice"), CharacterSet::Mixed);
    }

    #[test]
    fn emoji_only() {
        assert_eq!(character_set("😀🇺🇸👨‍👩‍👧‍👦"), CharacterSet::Emoji);
    }

    #[test]
    fn non_latin_scripts() {
        assert_eq!(character_set("привет"), CharacterSet::International);
        assert_eq!(character_set("日本語"), CharacterSet::International);
        assert_eq!(character_set("café"), CharacterSet::International);
        // Cyrillic а mixed with Latin still counts as letters.
        assert_eq!(character_set("аlice"), CharacterSet::International);
    }

    #[test]
    fn emoji_with_text_is_mixed() {
        assert_eq!(character_set("alice😀"), CharacterSet::Mixed);
    }

    #[test]
    fn display_matches_attribute_value() {
        assert_eq!(CharacterSet::Alphanumeric.to_string(), "alphanumeric");
        assert_eq!(CharacterSet::Emoji.to_string(), "emoji");
    }

    #[test]
    fn deterministic() {
        for s in ["x", "😀", "日本", "a_b"] {
            assert_eq!(character_set(s), character_set(s));
        }
    }
}
