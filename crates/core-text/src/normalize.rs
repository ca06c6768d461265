//! Name normalization check.
//!
//! Contract:
//! - `Normalizer::normalize` returns the canonical form of a full name or an error.
//! - `is_normalized` compares the input against that canonical form and fails
//!   closed: any normalizer error means "not normalized", never an error.
//! - Does not log raw names above debug level.
//!
//! `DefaultNormalizer` is a compact approximation of the ENS name normalization
//! rules: per-label NFC + lowercase, emoji presentation selectors stripped,
//! disallowed characters rejected, Latin mixed with Greek or Cyrillic rejected.
//! Embedding systems with a full implementation plug it in through the trait.

use thiserror::Error;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::glyph::is_combining_mark;

const VS16: char = '\u{FE0F}';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("empty label at position {0}")]
    EmptyLabel(usize),
    #[error("disallowed character {0:?}")]
    DisallowedCharacter(char),
    #[error("label mixes {0} and {1} scripts")]
    MixedScript(&'static str, &'static str),
    #[error("label starts with a combining mark")]
    LeadingCombiningMark,
}

/// External normalization capability.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, name: &str) -> Result<String, NormalizeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Greek,
    Cyrillic,
}

impl Script {
    fn of(c: char) -> Option<Self> {
        match c {
            'a'..='z' | 'A'..='Z' | '\u{00C0}'..='\u{024F}' => Some(Script::Latin),
            '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}' => Some(Script::Greek),
            '\u{0400}'..='\u{052F}' => Some(Script::Cyrillic),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Script::Latin => "Latin",
            Script::Greek => "Greek",
            Script::Cyrillic => "Cyrillic",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer;

impl DefaultNormalizer {
    fn normalize_label(&self, label: &str) -> Result<String, NormalizeError> {
        let composed: String = label
            .nfc()
            .filter(|c| *c != VS16)
            .flat_map(char::to_lowercase)
            .collect();

        if composed.chars().next().is_some_and(is_combining_mark) {
            return Err(NormalizeError::LeadingCombiningMark);
        }

        let mut seen: Option<Script> = None;
        for c in composed.chars() {
            if c.is_control() || c.is_whitespace() {
                return Err(NormalizeError::DisallowedCharacter(c));
            }
            if c.is_ascii_punctuation() && !matches!(c, '-' | '_' | '$') {
                return Err(NormalizeError::DisallowedCharacter(c));
            }
            if let Some(script) = Script::of(c) {
                match seen {
                    Some(prev) if prev != script => {
                        return Err(NormalizeError::MixedScript(prev.name(), script.name()));
                    }
                    _ => seen = Some(script),
                }
            }
        }
        Ok(composed)
    }
}

impl Normalizer for DefaultNormalizer {
    fn normalize(&self, name: &str) -> Result<String, NormalizeError> {
        let mut labels = Vec::new();
        for (idx, label) in name.split('.').enumerate() {
            if label.is_empty() {
                return Err(NormalizeError::EmptyLabel(idx));
            }
            labels.push(self.normalize_label(label)?);
        }
        Ok(labels.join("."))
    }
}

/// True iff `name` already equals its normalized form. Normalizer errors map to `false`.
pub fn is_normalized(name: &str, normalizer: &dyn Normalizer) -> bool {
    match normalizer.normalize(name) {
        Ok(normalized) => normalized == name,
        Err(err) => {
            debug!(target: "text.normalize", %err, "normalization_rejected");
            false
        }
    }
}
