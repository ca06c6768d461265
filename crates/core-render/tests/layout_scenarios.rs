use std::sync::Arc;

use core_fonts::{FixedAdvanceMeasurer, FontFitter};
use core_model::{AttributeValue, MetadataInit, MetadataRecord, Version};
use core_render::{DomainText, LayoutEngine, SvgTemplate, TemplateParams, render_by_version};
use core_text::DefaultNormalizer;
use pretty_assertions::assert_eq;

fn fitter() -> FontFitter {
    FontFitter::with_measurer(Arc::new(FixedAdvanceMeasurer::new(10.0)))
}

fn record(name: &str) -> MetadataRecord {
    MetadataRecord::new(
        MetadataInit::new(name, "98765432109876543210", 1_700_000_000, Version::V1),
        &DefaultNormalizer,
    )
    .unwrap()
}

#[test]
fn apex_name_single_line_without_warning() {
    let r = record("alice.mon");
    assert!(r.is_normalized());
    assert_eq!(r.attributes()[1].value(), &AttributeValue::Number(5));
    assert_eq!(r.attributes()[2].value(), &AttributeValue::Number(5));
    assert!(!r.description().contains("ATTENTION"));

    let f = fitter();
    let params = LayoutEngine::new(&f).layout(r.display_name());
    assert!(!params.is_subdomain);
    assert!(params.subdomain.is_none());
}

#[test]
fn subdomain_name_gets_fixed_position_block() {
    let r = record("sub.alice.mon");
    let f = fitter();
    let params = LayoutEngine::new(&f).layout(r.display_name());
    assert!(params.is_subdomain);
    assert_eq!(params.domain.text, DomainText::Single("alice.mon".into()));
    let sub = params.subdomain.expect("subdomain block");
    assert_eq!(sub.text, "sub.");
    assert_eq!((sub.x, sub.y), (32.5, 200.0));
}

#[test]
fn thirty_code_points_split_at_fifteen() {
    let name = format!("{}.mon", "abcdefghijklmnopqrstuvwxyz");
    assert_eq!(name.chars().count(), 30);
    let f = fitter();
    let fitted = f.fit_font_size(&name);
    let params = LayoutEngine::new(&f).layout(&name);
    assert_eq!(params.domain.font_size, (fitted - 2) * 2);
    assert_eq!(
        params.domain.text,
        DomainText::Split {
            first: "abcdefghijklmno".into(),
            second: "pqrstuvwxyz.mon".into(),
        }
    );
}

#[test]
fn split_threshold_counts_code_points_not_segments() {
    // 11 decomposed letters + ".mon": 26 code points but only 15 segments.
    let name = format!("{}.mon", "e\u{0301}".repeat(11));
    assert_eq!(name.chars().count(), 26);
    let f = fitter();
    let params = LayoutEngine::new(&f).layout(&name);
    assert!(params.domain.text.is_split());
    assert_eq!(params.domain.segment_length, 15);
}

#[test]
fn unknown_version_names_offender() {
    let r = record("alice.mon");
    let f = fitter();
    let layout = LayoutEngine::new(&f).layout(r.display_name());
    let err = render_by_version(
        &SvgTemplate::default(),
        "v7",
        TemplateParams::from_record(&r, &layout),
    )
    .unwrap_err();
    assert!(err.to_string().contains("v7"));
}

#[test]
fn homograph_label_warns_regardless_of_normalization() {
    // Cyrillic "а" + Latin "lice" fails normalization (mixed script).
    let mixed = record("аlice.mon");
    assert!(!mixed.is_normalized());
    assert!(mixed.description().contains("IDN_homograph_attack"));

    let cyrillic = record("привет.mon");
    assert!(cyrillic.is_normalized());
    assert!(cyrillic.description().contains("IDN_homograph_attack"));
}

#[test]
fn obfuscated_record_lays_out_as_one_domain() {
    let r = record("Alice.mon");
    assert_eq!(r.display_name(), "[987654...3210].mon");
    let f = fitter();
    let params = LayoutEngine::new(&f).layout(r.display_name());
    assert!(params.subdomain.is_none());
    assert_eq!(
        params.domain.text,
        DomainText::Single("[987654...3210].mon".into())
    );
}
