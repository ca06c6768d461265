//! Text width measurement seam.
//!
//! The fitter never measures glyphs itself; it asks a `TextMeasurer`. The
//! default `AdvanceMeasurer` sums per-cluster em advances from
//! `core_text::glyph`, which is deterministic and needs no font rasterizer.
//! Embedders with a real shaping backend implement the trait instead.

use crate::FontSpec;
use core_text::{em_advance, grapheme};

pub trait TextMeasurer: Send + Sync {
    /// Rendered width of `text` in canvas units at `font`.
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64;
}

/// Grapheme-aware advance-table estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvanceMeasurer;

impl TextMeasurer for AdvanceMeasurer {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f64 {
        let ems: f64 = grapheme::iter(text).map(em_advance).sum();
        ems * f64::from(font.size_px)
    }
}

/// Every code point advances by the same fixed number of canvas units,
/// regardless of font size. Handy as a predictable fake.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMeasurer {
    pub per_code_point: f64,
}

impl FixedAdvanceMeasurer {
    pub fn new(per_code_point: f64) -> Self {
        Self { per_code_point }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure_width(&self, text: &str, _font: &FontSpec) -> f64 {
        text.chars().count() as f64 * self.per_code_point
    }
}
