// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trellis::render::{render_svg, render_text, SvgOptions, TextOptions};

mod fixtures;
mod profiler;

// Group names (`render.svg`, `render.text`) and case ids stay stable so results remain
// comparable across refactors.
fn benches_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render.svg");
    for case in fixtures::Case::ALL {
        let atlas = fixtures::atlas(case);
        let resolved = atlas.resolve(atlas.default_view_id().as_str()).expect("resolve");
        let options = SvgOptions::default();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let svg = render_svg(black_box(&resolved), black_box(&options)).expect("render_svg");
                black_box(svg.len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("render.text");
    for case in fixtures::Case::ALL {
        let atlas = fixtures::atlas(case);
        let resolved = atlas.resolve(atlas.default_view_id().as_str()).expect("resolve");
        let options = TextOptions::default();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let text = render_text(black_box(&resolved), black_box(&options)).expect("render_text");
                black_box(text.len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_render
}
criterion_main!(benches);
