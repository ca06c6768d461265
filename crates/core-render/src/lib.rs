//! Badge layout + markup assembly.
//!
//! Pipeline: `MetadataRecord::display_name` -> `layout::LayoutEngine` (font
//! fitting, truncation, line split) -> `template::TemplateRenderer` -> markup
//! stored on the record by `image::ImageGenerator`.
//!
//! Failure policy: layout never fails; renderer errors are absorbed by the
//! generator, which stores an empty image and reports the reason through
//! `ImageOutcome::Failed` instead of discarding it.

use thiserror::Error;

pub mod image;
pub mod layout;
pub mod template;

pub use image::{ImageGenerator, ImageOutcome, generate_image};
pub use layout::{
    DomainLayout, DomainText, LayoutEngine, LayoutParams, MAX_CHAR, SPLIT_THRESHOLD,
    SubdomainText, ellipsis,
};
pub use template::{SvgTemplate, TemplateParams, TemplateRenderer, render_by_version};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("unknown metadata version: {0}")]
    UnknownVersion(String),
    #[error("template rendering failed: {0}")]
    Template(String),
}
