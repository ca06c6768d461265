//! Badge text layout.
//!
//! Stages, in order:
//! 1. Split the display name on `.`; more than two labels marks a subdomain.
//! 2. Subdomain analysis (subdomain and not an obfuscated `...` fallback):
//!    peel off the apex domain, truncate the prefix past `MAX_CHAR`
//!    segments, fit its font size and pin it at (32.5, 200).
//! 3. Domain processing (always): truncate past `MAX_CHAR` segments, fit the
//!    font size, then split into two stacked lines past `SPLIT_THRESHOLD`
//!    code points with the size inflated to `(size - 2) * 2`.
//!
//! Truncation counts grapheme segments; the line split counts code points.

use core_fonts::FontFitter;
use core_text::{code_point_slice, grapheme, split_at_code_point};
use tracing::trace;

/// Segment length past which text is truncated with an ellipsis.
pub const MAX_CHAR: usize = 60;
/// Code point length past which the domain is split over two lines.
pub const SPLIT_THRESHOLD: usize = 25;
pub const SUBDOMAIN_X: f64 = 32.5;
pub const SUBDOMAIN_Y: f64 = 200.0;
/// Horizontal anchor of both lines of a split domain.
pub const SPLIT_LINE_X: f64 = 20.0;
/// Vertical offset (em) of each split line from the domain baseline.
pub const SPLIT_LINE_DY_EM: f64 = 1.2;

const OBFUSCATED_MARKER: &str = "...";

/// Fixed-offset splice: first `max_char - 7` code points, `...`, the three
/// code points at `[len - 7, len - 4)`, then `.mon`. Assumes a 4-char
/// `.tld`-like tail; it is not suffix-aware.
pub fn ellipsis_with(s: &str, max_char: usize) -> String {
    let len = s.chars().count();
    format!(
        "{}...{}.mon",
        code_point_slice(s, 0, max_char.saturating_sub(7)),
        code_point_slice(s, len.saturating_sub(7), len.saturating_sub(4)),
    )
}

pub fn ellipsis(s: &str) -> String {
    ellipsis_with(s, MAX_CHAR)
}

// Counts grapheme segments without the empty-label error path; an empty
// string simply has no segments here.
fn segments(s: &str) -> usize {
    grapheme::iter(s).count()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubdomainText {
    pub text: String,
    pub font_size: i32,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainText {
    Single(String),
    Split { first: String, second: String },
}

impl DomainText {
    pub fn is_split(&self) -> bool {
        matches!(self, DomainText::Split { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainLayout {
    pub text: DomainText,
    pub font_size: i32,
    /// Segment length after truncation clamping; not re-measured.
    pub segment_length: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub is_subdomain: bool,
    pub subdomain: Option<SubdomainText>,
    pub domain: DomainLayout,
}

pub struct LayoutEngine<'a> {
    fitter: &'a FontFitter,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(fitter: &'a FontFitter) -> Self {
        Self { fitter }
    }

    pub fn layout(&self, display_name: &str) -> LayoutParams {
        let is_subdomain = display_name.split('.').count() > 2;
        let (domain, subdomain) = self.process_subdomain(display_name, is_subdomain);
        let domain = self.process_domain(&domain);
        trace!(
            target: "render.layout",
            is_subdomain,
            has_subdomain_text = subdomain.is_some(),
            font_size = domain.font_size,
            split = domain.text.is_split(),
            "layout_computed"
        );
        LayoutParams {
            is_subdomain,
            subdomain,
            domain,
        }
    }

    /// Returns the domain left for processing and the subdomain text block, if any.
    pub fn process_subdomain(
        &self,
        name: &str,
        is_subdomain: bool,
    ) -> (String, Option<SubdomainText>) {
        if !is_subdomain || name.contains(OBFUSCATED_MARKER) {
            return (name.to_string(), None);
        }
        let labels: Vec<&str> = name.split('.').collect();
        let (prefix, apex) = labels.split_at(labels.len() - 2);
        let mut subdomain = format!("{}.", prefix.join("."));
        if segments(&subdomain) > MAX_CHAR {
            subdomain = ellipsis(&subdomain);
        }
        let font_size = self.fitter.fit_font_size(&subdomain);
        (
            apex.join("."),
            Some(SubdomainText {
                text: subdomain,
                font_size,
                x: SUBDOMAIN_X,
                y: SUBDOMAIN_Y,
            }),
        )
    }

    pub fn process_domain(&self, domain: &str) -> DomainLayout {
        let mut segment_length = segments(domain);
        let domain = if segment_length > MAX_CHAR {
            segment_length = MAX_CHAR;
            ellipsis(domain)
        } else {
            domain.to_string()
        };

        let mut font_size = self.fitter.fit_font_size(&domain);
        let visible_length = domain.chars().count();
        let text = if visible_length > SPLIT_THRESHOLD {
            let (first, second) = split_at_code_point(&domain, visible_length / 2);
            font_size = (font_size - 2) * 2;
            DomainText::Split {
                first: first.to_string(),
                second: second.to_string(),
            }
        } else {
            DomainText::Single(domain)
        };

        DomainLayout {
            text,
            font_size,
            segment_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_fonts::FixedAdvanceMeasurer;
    use std::sync::Arc;

    fn fitter() -> FontFitter {
        // width = 10 * code points -> size = min(floor(644 / n), 30)
        FontFitter::with_measurer(Arc::new(FixedAdvanceMeasurer::new(10.0)))
    }

    #[test]
    fn ellipsis_splice_offsets() {
        let s = format!("{}wxyz.mon", "a".repeat(60));
        let out = ellipsis(&s);
        assert_eq!(out, format!("{}...xyz.mon", "a".repeat(53)));
    }

    #[test]
    fn ellipsis_on_short_input_clamps() {
        assert_eq!(ellipsis("abc"), "abc....mon");
        assert_eq!(ellipsis(""), "....mon");
    }

    #[test]
    fn apex_name_is_not_a_subdomain() {
        let f = fitter();
        let params = LayoutEngine::new(&f).layout("alice.mon");
        assert!(!params.is_subdomain);
        assert!(params.subdomain.is_none());
        assert_eq!(params.domain.text, DomainText::Single("alice.mon".into()));
        assert_eq!(params.domain.font_size, 30);
    }

    #[test]
    fn subdomain_peels_apex() {
        let f = fitter();
        let params = LayoutEngine::new(&f).layout("deep.sub.alice.mon");
        assert!(params.is_subdomain);
        let sub = params.subdomain.unwrap();
        assert_eq!(sub.text, "deep.sub.");
        assert_eq!((sub.x, sub.y), (32.5, 200.0));
        assert_eq!(params.domain.text, DomainText::Single("alice.mon".into()));
    }

    #[test]
    fn obfuscated_fallback_is_never_decomposed() {
        let f = fitter();
        let params = LayoutEngine::new(&f).layout("[123456...7890].mon");
        // Dots inside the marker still count as separators.
        assert!(params.is_subdomain);
        assert!(params.subdomain.is_none());
        assert_eq!(
            params.domain.text,
            DomainText::Single("[123456...7890].mon".into())
        );
    }

    #[test]
    fn long_subdomain_prefix_truncated() {
        let f = fitter();
        let name = format!("{}.alice.mon", "s".repeat(70));
        let params = LayoutEngine::new(&f).layout(&name);
        let sub = params.subdomain.unwrap();
        // prefix is 71 code points: 53 's', '...', code points [64, 67), '.mon'
        assert_eq!(sub.text, format!("{}...sss.mon", "s".repeat(53)));
        assert_eq!(sub.font_size, 644 / 63);
    }

    #[test]
    fn split_at_half_code_points_and_inflate() {
        let f = fitter();
        let domain = format!("{}.mon", "a".repeat(26)); // 30 code points
        let layout = LayoutEngine::new(&f).process_domain(&domain);
        let fitted = 644 / 30;
        assert_eq!(layout.font_size, (fitted - 2) * 2);
        match layout.text {
            DomainText::Split { first, second } => {
                assert_eq!(first.chars().count(), 15);
                assert_eq!(second, format!("{}.mon", "a".repeat(11)));
            }
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn exactly_threshold_stays_single_line() {
        let f = fitter();
        let domain = format!("{}.mon", "a".repeat(21)); // 25 code points
        let layout = LayoutEngine::new(&f).process_domain(&domain);
        assert!(!layout.text.is_split());
        assert_eq!(layout.font_size, 644 / 25);
    }

    #[test]
    fn long_domain_truncated_then_split() {
        let f = fitter();
        let domain = format!("{}.mon", "b".repeat(80));
        let layout = LayoutEngine::new(&f).process_domain(&domain);
        assert_eq!(layout.segment_length, MAX_CHAR);
        // truncated form is 53 + 3 + 3 + 4 = 63 code points
        let fitted = 644 / 63;
        assert_eq!(layout.font_size, (fitted - 2) * 2);
        match layout.text {
            DomainText::Split { first, second } => {
                assert_eq!(first.chars().count(), 31);
                assert_eq!(format!("{first}{second}"), format!("{}...bbb.mon", "b".repeat(53)));
            }
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn emoji_counts_once_for_truncation_but_per_code_point_for_split() {
        let f = fitter();
        // 20 family emoji: 20 segments (< MAX_CHAR) but 140 code points.
        let family = "👨\u{200D}👩\u{200D}👧\u{200D}👦";
        let domain = format!("{}.mon", family.repeat(20));
        let layout = LayoutEngine::new(&f).process_domain(&domain);
        assert_eq!(layout.segment_length, 24);
        assert!(layout.text.is_split());
    }
}
