//! Unicode label classification.
//!
//! Two length metrics live here and they are deliberately kept apart:
//! - `code_point_length`: number of Unicode scalar values.
//! - `segment_length`: number of extended grapheme clusters, so a flag emoji,
//!   a ZWJ family or `e` + combining acute each count as one unit.
//!
//! Invariant: `segment_length(s) <= code_point_length(s)` for every non-empty `s`.
//! Both reject the empty string with `TextError::EmptyLabel`.

use thiserror::Error;

pub mod charset;
pub mod glyph;
pub mod normalize;

pub use charset::{CharacterSet, character_set};
pub use glyph::{GlyphClass, classify_cluster, em_advance};
pub use normalize::{DefaultNormalizer, NormalizeError, Normalizer, is_normalized};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("label cannot be empty")]
    EmptyLabel,
}

/// True iff every code point is in the ASCII range.
pub fn is_ascii(s: &str) -> bool {
    s.is_ascii()
}

/// Number of Unicode scalar values in `s`.
pub fn code_point_length(s: &str) -> Result<usize, TextError> {
    if s.is_empty() {
        return Err(TextError::EmptyLabel);
    }
    Ok(s.chars().count())
}

/// Number of extended grapheme clusters in `s`.
pub fn segment_length(s: &str) -> Result<usize, TextError> {
    if s.is_empty() {
        return Err(TextError::EmptyLabel);
    }
    Ok(grapheme::iter(s).count())
}

/// Byte offset of the code point at `index`, or `s.len()` when out of range.
fn byte_offset(s: &str, index: usize) -> usize {
    s.char_indices()
        .nth(index)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

/// Slice `s` by code point indices `[start, end)`, clamped to the string.
/// An inverted range yields the empty string.
pub fn code_point_slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let from = byte_offset(s, start);
    let to = byte_offset(s, end);
    &s[from..to]
}

/// Split `s` after `index` code points.
pub fn split_at_code_point(s: &str, index: usize) -> (&str, &str) {
    s.split_at(byte_offset(s, index))
}

/// Grapheme helpers shared by the classifier and the glyph measurer.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;

    /// Iterate extended grapheme clusters.
    pub fn iter(s: &str) -> impl Iterator<Item = &str> {
        s.graphemes(true)
    }
}
