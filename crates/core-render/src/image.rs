//! Image generation for a metadata record.

use core_fonts::FontFitter;
use core_model::MetadataRecord;
use tracing::{debug, warn};

use crate::RenderError;
use crate::layout::LayoutEngine;
use crate::template::{SvgTemplate, TemplateParams, TemplateRenderer};

/// Result of one `generate` call. The record is updated either way.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Markup stored in `image` / `image_url`; `font_size` is the domain size used.
    Rendered { bytes: usize, font_size: i32 },
    /// `image` / `image_url` set to the empty string.
    Failed(RenderError),
}

impl ImageOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, ImageOutcome::Rendered { .. })
    }

    pub fn error(&self) -> Option<&RenderError> {
        match self {
            ImageOutcome::Failed(err) => Some(err),
            ImageOutcome::Rendered { .. } => None,
        }
    }
}

pub struct ImageGenerator<'a> {
    fitter: &'a FontFitter,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> ImageGenerator<'a> {
    pub fn new(fitter: &'a FontFitter, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { fitter, renderer }
    }

    pub fn generate(&self, record: &mut MetadataRecord) -> ImageOutcome {
        let layout = LayoutEngine::new(self.fitter).layout(record.display_name());
        let rendered = self
            .renderer
            .render(&TemplateParams::from_record(record, &layout));
        match rendered {
            Ok(markup) => {
                let bytes = markup.len();
                let font_size = layout.domain.font_size;
                record.set_image(markup);
                debug!(
                    target: "render.image",
                    bytes,
                    font_size,
                    is_subdomain = layout.is_subdomain,
                    version = %record.version(),
                    "image_rendered"
                );
                ImageOutcome::Rendered { bytes, font_size }
            }
            Err(err) => {
                warn!(
                    target: "render.image",
                    %err,
                    version = %record.version(),
                    "image_render_failed"
                );
                record.set_image(String::new());
                ImageOutcome::Failed(err)
            }
        }
    }
}

/// Generate with the process-wide fitter and the built-in SVG template.
pub fn generate_image(record: &mut MetadataRecord) -> ImageOutcome {
    ImageGenerator::new(core_fonts::shared(), &SvgTemplate::default()).generate(record)
}
