//! Font asset registration.
//!
//! Registration reads the font file once and records the family it provides.
//! Only the container signature is checked (TrueType, OpenType, collections,
//! WOFF/WOFF2); glyph tables are left to the measuring backend.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unrecognized font format in {0}")]
    UnrecognizedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    TrueType,
    OpenType,
    Collection,
    Woff,
    Woff2,
}

impl FontFormat {
    fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes.get(..4)? {
            [0x00, 0x01, 0x00, 0x00] | b"true" => Some(FontFormat::TrueType),
            b"OTTO" => Some(FontFormat::OpenType),
            b"ttcf" => Some(FontFormat::Collection),
            b"wOFF" => Some(FontFormat::Woff),
            b"wOF2" => Some(FontFormat::Woff2),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredFont {
    pub family: String,
    pub weight: String,
    pub style: String,
    pub format: FontFormat,
    pub size_bytes: usize,
}

#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: Vec<RegisteredFont>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        path: &Path,
        family: &str,
        weight: &str,
        style: &str,
    ) -> Result<&RegisteredFont, FontError> {
        let bytes = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format = FontFormat::sniff(&bytes)
            .ok_or_else(|| FontError::UnrecognizedFormat(path.to_path_buf()))?;
        debug!(target: "fonts", family, ?format, size_bytes = bytes.len(), "font_registered");
        self.fonts.push(RegisteredFont {
            family: family.to_string(),
            weight: weight.to_string(),
            style: style.to_string(),
            format,
            size_bytes: bytes.len(),
        });
        Ok(&self.fonts[self.fonts.len() - 1])
    }

    pub fn fonts(&self) -> &[RegisteredFont] {
        &self.fonts
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.fonts.iter().any(|f| f.family == family)
    }
}
