//! Grapheme cluster glyph classification.
//!
//! A single authoritative `classify_cluster` maps one extended grapheme
//! cluster (EGC) to a `GlyphClass`. Two consumers share it:
//! - the character-set classifier (emoji detection),
//! - the default advance-table measurer in `core-fonts`, through `em_advance`.
//!
//! Heuristic ranges only. Emoji composites take the wider advance.

use unicode_width::UnicodeWidthChar;

/// Semantic classification of a single grapheme cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphClass {
    Ascii(char),
    Narrow,
    Wide,
    Emoji,
    /// Base + combining mark(s); bool records whether the base is wide.
    Combining(bool),
    Other,
}

const ZWJ: char = '\u{200D}';
const KEYCAP_COMBINING: char = '\u{20E3}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_skin_tone_modifier(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

// Primary emoji blocks plus Misc Symbols + Dingbats where legacy emoji live.
pub(crate) fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

pub(crate) fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

fn is_wide(c: char) -> bool {
    UnicodeWidthChar::width(c).unwrap_or(1) == 2
}

/// Classify an EGC (single grapheme slice).
pub fn classify_cluster(egc: &str) -> GlyphClass {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return GlyphClass::Other;
    };

    if chars.next().is_none() {
        if first.is_ascii() {
            return GlyphClass::Ascii(first);
        }
        if is_extended_pictographic(first) || is_regional_indicator(first) {
            return GlyphClass::Emoji;
        }
        if is_wide(first) {
            return GlyphClass::Wide;
        }
        return GlyphClass::Narrow;
    }

    let mut count_ep = 0usize;
    let mut count_ri = 0usize;
    let mut has_zwj = false;
    let mut has_skin = false;
    let mut has_combining = false;
    let mut any_wide = false;
    let mut last = first;

    for c in egc.chars() {
        if is_extended_pictographic(c) {
            count_ep += 1;
        }
        if is_regional_indicator(c) {
            count_ri += 1;
        }
        has_zwj |= c == ZWJ;
        has_skin |= is_skin_tone_modifier(c);
        has_combining |= is_combining_mark(c);
        any_wide |= is_wide(c);
        last = c;
    }

    // Keycap: digit, '#' or '*' (+ optional VS16) + U+20E3.
    if last == KEYCAP_COMBINING && (first.is_ascii_digit() || first == '#' || first == '*') {
        return GlyphClass::Emoji;
    }
    if count_ri == 2 || (has_zwj && count_ep >= 2) || (count_ep >= 1 && has_skin) {
        return GlyphClass::Emoji;
    }
    if count_ep >= 1 && !has_combining {
        return GlyphClass::Emoji;
    }
    if has_combining {
        return GlyphClass::Combining(is_wide(first) || is_extended_pictographic(first));
    }
    if any_wide {
        return GlyphClass::Wide;
    }
    GlyphClass::Narrow
}

/// Horizontal advance of an ASCII glyph in em units for a geometric sans.
fn ascii_advance(c: char) -> f64 {
    match c {
        ' ' => 0.25,
        'i' | 'l' | 'j' | '.' | ',' | ':' | ';' | '!' | '\'' | '|' => 0.26,
        'f' | 't' | 'r' | 'I' | '-' | '(' | ')' | '[' | ']' => 0.36,
        'm' | 'w' | 'M' | 'W' => 0.84,
        '_' => 0.5,
        '0'..='9' => 0.56,
        'A'..='Z' => 0.66,
        'a'..='z' => 0.54,
        _ => 0.45,
    }
}

/// Estimated advance of one grapheme cluster in em units.
pub fn em_advance(egc: &str) -> f64 {
    match classify_cluster(egc) {
        GlyphClass::Ascii(c) => ascii_advance(c),
        GlyphClass::Narrow => 0.58,
        GlyphClass::Wide | GlyphClass::Combining(true) => 1.0,
        GlyphClass::Emoji => 1.17,
        GlyphClass::Combining(false) => 0.58,
        GlyphClass::Other => 0.0,
    }
}
