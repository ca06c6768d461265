//! SVG badge template.
//!
//! `TemplateRenderer` is the seam to the markup backend. `SvgTemplate` is the
//! built-in 270x270 badge; its variants are selected by an exhaustive match
//! on `Version`, so a new version fails to compile until it has a template.

use std::borrow::Cow;
use std::fmt::Write as _;

use core_model::{MetadataRecord, Version};

use crate::RenderError;
use crate::layout::{DomainText, LayoutParams, SPLIT_LINE_DY_EM, SPLIT_LINE_X};

const CANVAS: u32 = 270;
const DOMAIN_X: f64 = 32.5;
const DOMAIN_Y: f64 = 231.0;
const DEFAULT_FONT_FAMILY: &str =
    "Satoshi Variable, Noto Color Emoji, Apple Color Emoji, sans-serif";

/// Flat parameter set handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct TemplateParams<'a> {
    pub version: Version,
    pub layout: &'a LayoutParams,
    pub is_normalized: bool,
    pub background_image: Option<&'a str>,
    pub mime_type: Option<&'a str>,
}

impl<'a> TemplateParams<'a> {
    pub fn from_record(record: &'a MetadataRecord, layout: &'a LayoutParams) -> Self {
        Self {
            version: record.version(),
            layout,
            is_normalized: record.is_normalized(),
            background_image: record.background_image(),
            mime_type: record.mime_type(),
        }
    }
}

pub trait TemplateRenderer: Send + Sync {
    fn render(&self, params: &TemplateParams<'_>) -> Result<String, RenderError>;
}

/// Render with an untyped version tag. Unknown tags fail before the renderer runs.
pub fn render_by_version(
    renderer: &dyn TemplateRenderer,
    version_tag: &str,
    params: TemplateParams<'_>,
) -> Result<String, RenderError> {
    let version = version_tag
        .parse::<Version>()
        .map_err(|_| RenderError::UnknownVersion(version_tag.to_string()))?;
    renderer.render(&TemplateParams { version, ..params })
}

/// Escape text content and attribute values.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

struct Palette {
    from: &'static str,
    to: &'static str,
}

fn palette(version: Version) -> Palette {
    match version {
        Version::V1 => Palette {
            from: "#44BCF0",
            to: "#A099FF",
        },
        Version::V2 => Palette {
            from: "#836EF9",
            to: "#200052",
        },
    }
}

#[derive(Debug, Clone)]
pub struct SvgTemplate {
    font_family: String,
}

impl Default for SvgTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY)
    }
}

impl SvgTemplate {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
        }
    }

    fn write_background(&self, out: &mut String, params: &TemplateParams<'_>) {
        let Palette { from, to } = palette(params.version);
        let _ = write!(
            out,
            r##"<defs><linearGradient id="bg" x1="0" y1="0" x2="{CANVAS}" y2="{CANVAS}" gradientUnits="userSpaceOnUse"><stop stop-color="{from}"/><stop offset="1" stop-color="{to}"/></linearGradient></defs><rect width="{CANVAS}" height="{CANVAS}" fill="url(#bg)"/>"##
        );
        // Backgrounds are only honoured for normalized names.
        if let (true, Some(image)) = (params.is_normalized, params.background_image) {
            let mime = params.mime_type.unwrap_or("image/png");
            let _ = write!(
                out,
                r##"<image href="data:{};base64,{}" width="{CANVAS}" height="{CANVAS}" preserveAspectRatio="xMidYMid slice"/><rect width="{CANVAS}" height="{CANVAS}" fill="#000" fill-opacity="0.3"/>"##,
                escape_xml(mime),
                escape_xml(image)
            );
        }
        if params.version == Version::V2 {
            let _ = write!(
                out,
                r#"<text x="32.5" y="52" font-size="22px" fill="white" font-family="{}" font-weight="bold">MNS</text>"#,
                escape_xml(&self.font_family)
            );
        }
        if !params.is_normalized {
            out.push_str(
                r##"<circle cx="244" cy="26" r="12" fill="#FF3B30"/><text x="244" y="32" font-size="16px" fill="white" text-anchor="middle" font-weight="bold">!</text>"##,
            );
        }
    }

    fn write_subdomain(&self, out: &mut String, layout: &LayoutParams) {
        let (true, Some(sub)) = (layout.is_subdomain, &layout.subdomain) else {
            return;
        };
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" font-size="{}px" fill="white" font-family="{}">{}</text>"#,
            sub.x,
            sub.y,
            sub.font_size,
            escape_xml(&self.font_family),
            escape_xml(&sub.text)
        );
    }

    fn write_domain(&self, out: &mut String, layout: &LayoutParams) {
        let _ = write!(
            out,
            r#"<text x="{DOMAIN_X}" y="{DOMAIN_Y}" font-size="{}px" fill="white" font-family="{}" font-weight="bold">"#,
            layout.domain.font_size,
            escape_xml(&self.font_family)
        );
        match &layout.domain.text {
            DomainText::Single(text) => out.push_str(&escape_xml(text.trim())),
            DomainText::Split { first, second } => {
                let _ = write!(
                    out,
                    r#"<tspan x="{SPLIT_LINE_X}" dy="-{SPLIT_LINE_DY_EM}em">{}</tspan><tspan x="{SPLIT_LINE_X}" dy="{SPLIT_LINE_DY_EM}em">{}</tspan>"#,
                    escape_xml(first),
                    escape_xml(second)
                );
            }
        }
        out.push_str("</text>");
    }
}

impl TemplateRenderer for SvgTemplate {
    fn render(&self, params: &TemplateParams<'_>) -> Result<String, RenderError> {
        let mut out = String::with_capacity(1024);
        let _ = write!(
            out,
            r#"<svg width="{CANVAS}" height="{CANVAS}" viewBox="0 0 {CANVAS} {CANVAS}" fill="none" xmlns="http://www.w3.org/2000/svg" data-version="{}">"#,
            params.version
        );
        self.write_background(&mut out, params);
        self.write_subdomain(&mut out, params.layout);
        self.write_domain(&mut out, params.layout);
        out.push_str("</svg>");
        Ok(out)
    }
}
