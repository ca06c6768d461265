use std::hint::black_box;
use std::sync::Arc;

use core_fonts::{AdvanceMeasurer, FontFitter};
use core_render::LayoutEngine;
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_layout(c: &mut Criterion) {
    let fitter = FontFitter::with_measurer(Arc::new(AdvanceMeasurer));
    let engine = LayoutEngine::new(&fitter);
    let long = format!("{}.mon", "verylonglabel".repeat(8));
    let emoji = format!("{}.mon", "👨\u{200D}👩\u{200D}👧\u{200D}👦".repeat(30));

    c.bench_function("layout_apex", |b| b.iter(|| engine.layout(black_box("alice.mon"))));
    c.bench_function("layout_subdomain", |b| {
        b.iter(|| engine.layout(black_box("pay.wallet.alice.mon")))
    });
    c.bench_function("layout_truncated_split", |b| b.iter(|| engine.layout(black_box(&long))));
    c.bench_function("layout_emoji_zwj", |b| b.iter(|| engine.layout(black_box(&emoji))));
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
